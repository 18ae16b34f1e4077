use std::fmt;

/// A compiled script: directives in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub directives: Vec<Directive>,
}

impl Script {
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// One executable statement and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub line: usize,
}

/// Directive kinds with their kind-specific payload.
///
/// Payload text is stored as written (after the classifier's trimming) and
/// resolved against the variable store only when the directive executes.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveKind {
    /// `MKDIR <path>`
    MakeDir(String),
    /// `MKFILE <path>`
    MakeFile(String),
    /// `DOWNLOAD <url> TO <path>`
    Download { url: String, path: String },
    /// `COMPARE <left> == <right>`
    Compare { left: String, right: String },
    /// `PRINT <text>`
    Print(String),
    /// `SET <name> = <value>`
    Set { name: String, value: String },
    /// `READ <name>`
    Read(String),
    /// `IF <condition>`; the condition is checked for `==` at run time.
    If(String),
    Else,
    EndIf,
}

impl DirectiveKind {
    /// The statement keyword, as written in scripts.
    pub fn keyword(&self) -> &'static str {
        match self {
            DirectiveKind::MakeDir(_) => "MKDIR",
            DirectiveKind::MakeFile(_) => "MKFILE",
            DirectiveKind::Download { .. } => "DOWNLOAD",
            DirectiveKind::Compare { .. } => "COMPARE",
            DirectiveKind::Print(_) => "PRINT",
            DirectiveKind::Set { .. } => "SET",
            DirectiveKind::Read(_) => "READ",
            DirectiveKind::If(_) => "IF",
            DirectiveKind::Else => "ELSE",
            DirectiveKind::EndIf => "ENDIF",
        }
    }
}

impl fmt::Display for DirectiveKind {
    /// Canonical statement text, without the terminator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = self.keyword();
        match self {
            DirectiveKind::MakeDir(arg)
            | DirectiveKind::MakeFile(arg)
            | DirectiveKind::Print(arg)
            | DirectiveKind::Read(arg)
            | DirectiveKind::If(arg) => write!(f, "{} {}", kw, arg),
            DirectiveKind::Download { url, path } => write!(f, "{} {} TO {}", kw, url, path),
            DirectiveKind::Compare { left, right } => write!(f, "{} {} == {}", kw, left, right),
            DirectiveKind::Set { name, value } => write!(f, "{} {} = {}", kw, name, value),
            DirectiveKind::Else | DirectiveKind::EndIf => f.write_str(kw),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
