//! Toolbar-driven rich text editing for the article form.
//!
//! [`RichTextEditor`] owns the glue between a fixed formatting palette and
//! whatever document is hosting the editor: it mounts the toolbar, makes
//! the surface editable, routes button presses to native format commands,
//! forces pastes down to plain text and always hands focus back to the
//! editor so the selection survives a trip through the toolbar. The host
//! side is abstracted behind [`EditorHost`], so the same dispatch logic
//! runs against a real page bridge or the recording host in the tests.
//!
//! # Examples
//!
//! ```rust,ignore
//! let mut editor = RichTextEditor::new(page, "articleEditor", "editorToolbar")
//!     .expect("admin page markup present");
//!
//! // Wired to the bold button:
//! editor.execute_command("bold", None);
//! ```

pub mod command;
pub mod host;


pub use command::{url_prompt, CommandSpec, TOOLBAR_COMMANDS};
pub use host::{EditorHost, PasteData};

/// Formatting dispatcher for a `contenteditable`-style article editor.
pub struct RichTextEditor<H: EditorHost> {
    host: H,
}

impl<H: EditorHost> RichTextEditor<H> {
    /// Wires up the toolbar and editor surface, taking ownership of the
    /// host. Hosts deliver subsequent toolbar clicks to
    /// [`execute_command`](Self::execute_command) and paste events to
    /// [`handle_paste`](Self::handle_paste).
    ///
    /// Returns `None` when either element is missing from the host
    /// document, leaving the page untouched; the rest of the admin page
    /// keeps working without the editor.
    pub fn new(mut host: H, editor_id: &str, toolbar_id: &str) -> Option<Self> {
        if !host.has_element(editor_id) || !host.has_element(toolbar_id) {
            tracing::error!("Editor or toolbar element not found");
            return None;
        }

        host.mount_toolbar(&TOOLBAR_COMMANDS);
        host.set_editable(true);

        Some(Self { host })
    }

    /// Runs one formatting command against the current selection.
    ///
    /// Link and image commands prompt for a URL first; a dismissed or
    /// empty prompt skips the command entirely. Focus returns to the
    /// editor in every case, including the skipped ones.
    pub fn execute_command(&mut self, command: &str, argument: Option<&str>) {
        match url_prompt(command) {
            Some(message) => {
                let url = self
                    .host
                    .prompt_for_url(message)
                    .filter(|url| !url.is_empty());
                if let Some(url) = url {
                    self.host.exec_format_command(command, Some(&url));
                }
            }
            None => self.host.exec_format_command(command, argument),
        }

        self.host.focus_editor();
    }

    /// Replaces a paste with its plain-text flavor, dropping whatever
    /// markup the clipboard carried.
    pub fn handle_paste(&mut self, paste: &PasteData) {
        self.host.insert_plain_text(&paste.plain_text);
    }

    /// Current markup of the editor surface.
    pub fn content(&self) -> String {
        self.host.serialized_content()
    }

    /// Replaces the editor surface markup, e.g. when loading an article
    /// into the form.
    pub fn set_content(&mut self, content: &str) {
        self.host.set_serialized_content(content);
    }
}
