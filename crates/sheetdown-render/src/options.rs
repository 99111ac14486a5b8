//! Render options

/// Options for rendering tables
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Line terminator between rows
    pub line_terminator: LineTerminator,
    /// Terminate the last row as well
    pub trailing_newline: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_terminator: LineTerminator::LF,
            trailing_newline: true,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}

impl LineTerminator {
    pub fn as_str(self) -> &'static str {
        match self {
            LineTerminator::LF => "\n",
            LineTerminator::CRLF => "\r\n",
        }
    }
}
