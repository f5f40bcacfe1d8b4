use crate::scanner::{Scanner, TokenType};

fn kinds(source: &str) -> Vec<TokenType> {
    let mut scanner = Scanner::new(source);
    let mut kinds = Vec::new();
    loop {
        let token = scanner.scan_token();
        let kind = token.kind;
        kinds.push(kind);
        if kind == TokenType::EOF {
            break;
        }
    }
    kinds
}

#[test]
fn scans_keywords_distinctly_from_identifiers() {
    let found = kinds("var print foo");
    assert_eq!(found, vec![TokenType::VAR, TokenType::PRINT, TokenType::IDENTIFIER, TokenType::EOF]);
}

#[test]
fn scans_number_with_fractional_part() {
    let mut scanner = Scanner::new("12.34");
    let token = scanner.scan_token();
    assert_eq!(token.kind, TokenType::NUMBER);
    assert_eq!(token.lexeme, "12.34");
}

#[test]
fn a_lone_dot_does_not_start_a_fraction() {
    let found = kinds("12.");
    assert_eq!(found[0], TokenType::NUMBER);
    assert_eq!(found[1], TokenType::ERROR);
}

#[test]
fn string_token_spans_the_quotes() {
    let mut scanner = Scanner::new("\"hello\"");
    let token = scanner.scan_token();
    assert_eq!(token.kind, TokenType::STRING);
    assert_eq!(Scanner::string_value(token.lexeme), "hello");
}

#[test]
fn unterminated_string_is_an_error_token() {
    let mut scanner = Scanner::new("\"hello");
    let token = scanner.scan_token();
    assert_eq!(token.kind, TokenType::ERROR);
    assert_eq!(token.lexeme, "Unterminated string");
}

#[test]
fn line_comments_are_skipped() {
    let found = kinds("// a comment\nvar");
    assert_eq!(found, vec![TokenType::VAR, TokenType::EOF]);
}

#[test]
fn newlines_advance_the_line_counter() {
    let mut scanner = Scanner::new("\n\nvar");
    let token = scanner.scan_token();
    assert_eq!(token.line, 3);
}

#[test]
fn unexpected_character_is_an_error_token() {
    let mut scanner = Scanner::new("@");
    let token = scanner.scan_token();
    assert_eq!(token.kind, TokenType::ERROR);
    assert_eq!(token.lexeme, "Unexpected character.");
}

#[test]
fn two_character_logical_operators_are_recognized() {
    let found = kinds("&& || != == <= >=");
    assert_eq!(
        found,
        vec![
            TokenType::AND,
            TokenType::OR,
            TokenType::BANG_EQUAL,
            TokenType::EQUAL_EQUAL,
            TokenType::LESS_EQUAL,
            TokenType::GREATER_EQUAL,
            TokenType::EOF,
        ]
    );
}
