/// Lexical tokens of the surface language.
///
/// `Number`, `Id`, `String`, and `Char` carry payloads; every keyword,
/// comparison compound, and structural marker is a payload-free singleton.
/// Two tokens are equal iff they are the same variant with the same payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Number(i64),
    Id(String),
    String(String),
    Char(char),

    // Keywords
    Class,
    Return,
    If,
    Else,
    Def,
    Print,
    And,
    Or,
    Not,
    None,
    True,
    False,

    // Comparison compounds
    Eq,          // ==
    NotEq,       // !=
    LessOrEq,    // <=
    GreaterOrEq, // >=

    // Structural
    Newline,
    Indent,
    Dedent,
    Eof,
}
