/// Which half of the page is showing: the form or the rendered code

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    FormVisible,
    CodeVisible,
}

impl Screen {
    /// A code was rendered successfully.
    pub fn on_encoded(self) -> Screen {
        Screen::CodeVisible
    }

    /// The user asked to edit their information.
    pub fn on_edit(self) -> Screen {
        Screen::FormVisible
    }
}
