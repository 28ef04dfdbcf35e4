//! End-of-line detection.

/// Line terminator convention of a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Carriage Return + Line Feed (Windows) - \r\n
    Crlf,
    /// Line Feed (Unix/Linux/macOS) - \n
    Lf,
}

impl LineEnding {
    /// Terminator convention of the host platform.
    pub fn native() -> Self {
        if cfg!(windows) { LineEnding::Crlf } else { LineEnding::Lf }
    }

    /// The terminator characters themselves.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }

    /// Label used when reporting the convention.
    pub fn label(self) -> &'static str {
        match self {
            LineEnding::Crlf => "CRLF",
            LineEnding::Lf => "LF",
        }
    }

    /// Detect the dominant terminator in `text`.
    ///
    /// CRLF pairs and bare LFs are counted separately so a CRLF is never
    /// also counted as an LF. CRLF wins only on strict majority; equal
    /// counts resolve to LF. Text without any terminator falls back to
    /// the platform convention.
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut crlf = 0usize;
        let mut lf_only = 0usize;

        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                if i > 0 && bytes[i - 1] == b'\r' {
                    crlf += 1;
                } else {
                    lf_only += 1;
                }
            }
        }

        if crlf > lf_only {
            LineEnding::Crlf
        } else if lf_only > 0 {
            LineEnding::Lf
        } else {
            LineEnding::native()
        }
    }
}
