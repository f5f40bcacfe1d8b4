use crate::scanner::TokenType;

/// Precedence levels in ascending order, the way the teacher's
/// `Precedence` enum orders its variants so that a numeric comparison
/// between two levels tells you which binds tighter.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Precedence {
    NONE,
    ASSIGNMENT, // =
    OR,         // or
    AND,        // and
    EQUALITY,   // == !=
    COMPARISON, // < > <= >=
    TERM,       // + -
    FACTOR,     // * /
    UNARY,      // ! -
    CALL,       // . ()
    PRIMARY,
}

impl Precedence {
    /// The next tighter-binding level, used by `binary` to parse its
    /// right-hand operand with left-associativity.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::NONE => Precedence::ASSIGNMENT,
            Precedence::ASSIGNMENT => Precedence::OR,
            Precedence::OR => Precedence::AND,
            Precedence::AND => Precedence::EQUALITY,
            Precedence::EQUALITY => Precedence::COMPARISON,
            Precedence::COMPARISON => Precedence::TERM,
            Precedence::TERM => Precedence::FACTOR,
            Precedence::FACTOR => Precedence::UNARY,
            Precedence::UNARY => Precedence::CALL,
            Precedence::CALL => Precedence::PRIMARY,
            Precedence::PRIMARY => Precedence::PRIMARY,
        }
    }
}

/// A prefix or infix production: parses the expression it's bound to and
/// emits its bytecode. `can_assign` is threaded through so `variable` can
/// decide whether a trailing `=` starts an assignment or is a syntax error.
pub type ParseFn = for<'a> fn(&mut crate::compiler::Compiler<'a>, bool);

/// A Pratt parsing rule: which production (if any) applies when the token
/// shows up in prefix position, which applies when it shows up in infix
/// position, and at what precedence an infix use binds.
#[derive(Clone, Copy)]
pub struct ParseRule {
    pub prefix: Option<ParseFn>,
    pub infix: Option<ParseFn>,
    pub precedence: Precedence,
}

const fn rule(prefix: Option<ParseFn>, infix: Option<ParseFn>, precedence: Precedence) -> ParseRule {
    ParseRule { prefix, infix, precedence }
}

/// The per-token-type rule table that drives the single-pass Pratt parser.
/// Every token type not named here defaults to `(None, None, NONE)`, which
/// is what makes tokens like `;` or `)` act as expression terminators.
pub fn get_rule(kind: TokenType) -> ParseRule {
    use crate::compiler::expressions::*;
    use Precedence::*;
    use TokenType::*;

    match kind {
        LEFT_PAREN => rule(Some(grouping), None, NONE),
        MINUS => rule(Some(unary), Some(binary), TERM),
        PLUS => rule(None, Some(binary), TERM),
        SLASH => rule(None, Some(binary), FACTOR),
        STAR => rule(None, Some(binary), FACTOR),
        BANG => rule(Some(unary), None, NONE),
        BANG_EQUAL => rule(None, Some(binary), EQUALITY),
        EQUAL_EQUAL => rule(None, Some(binary), EQUALITY),
        GREATER => rule(None, Some(binary), COMPARISON),
        GREATER_EQUAL => rule(None, Some(binary), COMPARISON),
        LESS => rule(None, Some(binary), COMPARISON),
        LESS_EQUAL => rule(None, Some(binary), COMPARISON),
        IDENTIFIER => rule(Some(variable), None, NONE),
        STRING => rule(Some(string), None, NONE),
        NUMBER => rule(Some(number), None, NONE),
        AND => rule(None, Some(and_), AND),
        OR => rule(None, Some(or_), OR),
        TRUE | FALSE | NIL => rule(Some(literal), None, NONE),
        _ => rule(None, None, NONE),
    }
}
