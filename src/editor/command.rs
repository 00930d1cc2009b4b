/// One control in the fixed formatting palette.
///
/// `command` and `argument` feed the host's native format-command call
/// verbatim; `glyph` and `tooltip` are what the toolbar renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: &'static str,
    pub argument: Option<&'static str>,
    pub glyph: &'static str,
    pub tooltip: &'static str,
}

impl CommandSpec {
    const fn simple(command: &'static str, glyph: &'static str, tooltip: &'static str) -> Self {
        Self {
            command,
            argument: None,
            glyph,
            tooltip,
        }
    }

    const fn block(tag: &'static str, glyph: &'static str, tooltip: &'static str) -> Self {
        Self {
            command: "formatBlock",
            argument: Some(tag),
            glyph,
            tooltip,
        }
    }
}

/// The toolbar palette, in render order.
pub const TOOLBAR_COMMANDS: [CommandSpec; 14] = [
    CommandSpec::simple("bold", "B", "Bold"),
    CommandSpec::simple("italic", "I", "Italic"),
    CommandSpec::simple("underline", "U", "Underline"),
    CommandSpec::block("h2", "H2", "Heading 2"),
    CommandSpec::block("h3", "H3", "Heading 3"),
    CommandSpec::block("p", "¶", "Paragraph"),
    CommandSpec::simple("insertUnorderedList", "• List", "Bullet List"),
    CommandSpec::simple("insertOrderedList", "1. List", "Numbered List"),
    CommandSpec::simple("createLink", "🔗", "Insert Link"),
    CommandSpec::simple("insertImage", "🖼️", "Insert Image"),
    CommandSpec::simple("justifyLeft", "⇤", "Align Left"),
    CommandSpec::simple("justifyCenter", "⇔", "Align Center"),
    CommandSpec::simple("justifyRight", "⇥", "Align Right"),
    CommandSpec::simple("removeFormat", "✗", "Clear Formatting"),
];

/// The prompt a command shows before running, if it takes a user-supplied
/// URL instead of a palette argument.
pub fn url_prompt(command: &str) -> Option<&'static str> {
    match command {
        "createLink" => Some("Enter the link URL:"),
        "insertImage" => Some("Enter the image URL:"),
        _ => None,
    }
}
