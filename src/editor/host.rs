use crate::editor::command::CommandSpec;

/// Clipboard payload delivered to the paste handler.
///
/// Hosts hand over every flavor they have; only the plain text is ever
/// inserted.
#[derive(Debug, Clone, Default)]
pub struct PasteData {
    pub plain_text: String,
    pub html: Option<String>,
}

/// Capabilities the editor needs from its host environment.
///
/// The dispatcher is host-agnostic: anything that can render a toolbar,
/// run a document format command against a selection and move focus can
/// drive it, whether that is a browser bridge or the recording host the
/// tests use.
pub trait EditorHost {
    /// Whether an element with this id exists in the host document.
    fn has_element(&self, id: &str) -> bool;

    /// Renders one button per palette entry, replacing the toolbar
    /// container's contents.
    ///
    /// Each button carries its entry's command name and optional argument;
    /// the host routes clicks back into `execute_command` with exactly
    /// those two values.
    fn mount_toolbar(&mut self, commands: &[CommandSpec]);

    /// Toggles edit mode on the editor surface.
    fn set_editable(&mut self, editable: bool);

    /// Runs a native document format command against the current selection.
    fn exec_format_command(&mut self, command: &str, argument: Option<&str>);

    /// Moves keyboard focus back to the editor surface.
    fn focus_editor(&mut self);

    /// Whether the editor surface currently holds keyboard focus.
    fn is_editor_focused(&self) -> bool;

    /// Asks the user for a URL. `None` means the prompt was dismissed.
    fn prompt_for_url(&mut self, message: &str) -> Option<String>;

    /// Inserts plain text at the caret.
    fn insert_plain_text(&mut self, text: &str);

    /// The serialized markup of the editor surface.
    fn serialized_content(&self) -> String;

    /// Replaces the serialized markup of the editor surface.
    fn set_serialized_content(&mut self, content: &str);
}
