use std::{fmt, str::FromStr};

use tokio::fs::OpenOptions;

use super::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Access {
    /// `r`, open an existing file
    Read,
    /// `w`, create or truncate
    Write,
    /// `a`, create, writes always go to the end
    Append,
    /// `x`, create, failing if the file exists
    Exclusive,
    /// `c`, create, without truncating
    Create,
}

/// How a stream was opened, using the fopen mode strings
///
/// The read-only modes are `r` and `rb`, the write-only modes are `w`, `a`, `x`, `c` and their
/// `b` variants. Adding `+` (`r+`, `w+b`, ...) makes a mode read-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode {
    access: Access,
    plus: bool,
    binary: bool,
}

impl Mode {
    pub const READ: Self = Self::new(Access::Read, false);
    pub const READ_WRITE: Self = Self::new(Access::Read, true);
    pub const WRITE: Self = Self::new(Access::Write, false);
    pub const WRITE_READ: Self = Self::new(Access::Write, true);

    const fn new(access: Access, plus: bool) -> Self {
        Self {
            access,
            plus,
            binary: false,
        }
    }

    pub fn is_readable(&self) -> bool {
        self.plus || self.access == Access::Read
    }

    pub fn is_writable(&self) -> bool {
        self.plus || self.access != Access::Read
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// The tokio open options which behave like this mode
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(self.is_readable());
        match self.access {
            Access::Read => {
                options.write(self.plus);
            }
            Access::Write => {
                options.write(true).create(true).truncate(true);
            }
            Access::Append => {
                options.append(true).create(true);
            }
            Access::Exclusive => {
                options.write(true).create_new(true);
            }
            Access::Create => {
                options.write(true).create(true);
            }
        }
        options
    }
}

impl FromStr for Mode {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StreamError::InvalidMode(s.to_owned());
        let (first, mut rest) = s.as_bytes().split_first().ok_or_else(invalid)?;

        let access = match *first {
            b'r' => Access::Read,
            b'w' => Access::Write,
            b'a' => Access::Append,
            b'x' => Access::Exclusive,
            b'c' => Access::Create,
            _ => return Err(invalid()),
        };

        let plus = rest.first() == Some(&b'+');
        if plus {
            rest = &rest[1..];
        }
        let binary = match rest {
            [] => false,
            [b'b'] => true,
            _ => return Err(invalid()),
        };

        Ok(Self {
            access,
            plus,
            binary,
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.access {
            Access::Read => "r",
            Access::Write => "w",
            Access::Append => "a",
            Access::Exclusive => "x",
            Access::Create => "c",
        })?;
        if self.plus {
            f.write_str("+")?;
        }
        if self.binary {
            f.write_str("b")?;
        }
        Ok(())
    }
}
