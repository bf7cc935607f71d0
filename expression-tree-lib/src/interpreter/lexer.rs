use crate::interpreter::error::ParseError;
use crate::interpreter::token::Token;
use log::trace;
use std::iter::Peekable;
use std::str::CharIndices;

/// Splits expression text into tokens.
///
/// Whitespace only separates tokens; it is never required between them, so `3+4` and
/// `3 + 4` produce the same tokens. Variable names start with a letter or underscore.
///
/// # Arguments
///
/// * `expression`: The text to split.
///
/// returns: The tokens of the expression, in the order they appear.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use expression_tree::interpreter::lexer::tokenize;
/// use expression_tree::interpreter::token::Token;
///
/// let tokens = tokenize("x1 * 20")?;
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Identifier("x1".to_string()),
///         Token::Asterisk,
///         Token::LiteralInteger(20),
///     ]
/// );
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, ParseError> {
    let mut characters = expression.char_indices().peekable();
    let mut tokens = Vec::new();

    while let Some(&(position, character)) = characters.peek() {
        let token = match character {
            c if c.is_whitespace() => {
                characters.next();
                continue;
            }
            c if c.is_ascii_digit() => read_number(&mut characters)?,
            c if is_identifier_start(c) => read_identifier(&mut characters),
            c => {
                characters.next();
                symbol_token(c).ok_or(ParseError::UnexpectedCharacter {
                    character: c,
                    position,
                })?
            }
        };
        trace!("Read token {:?} at position {}", token, position);
        tokens.push(token);
    }

    Ok(tokens)
}

fn symbol_token(character: char) -> Option<Token> {
    match character {
        '+' => Some(Token::Plus),
        '-' => Some(Token::Dash),
        '*' => Some(Token::Asterisk),
        '/' => Some(Token::ForwardSlash),
        '~' => Some(Token::Tilde),
        '(' => Some(Token::LeftParentheses),
        ')' => Some(Token::RightParentheses),
        _ => None,
    }
}

fn is_identifier_start(character: char) -> bool {
    character.is_alphabetic() || character == '_'
}

fn is_identifier_part(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}

fn take_while(characters: &mut Peekable<CharIndices>, predicate: impl Fn(char) -> bool) -> String {
    let mut text = String::new();
    while let Some(&(_, character)) = characters.peek() {
        if !predicate(character) {
            break;
        }
        text.push(character);
        characters.next();
    }
    text
}

fn read_number(characters: &mut Peekable<CharIndices>) -> Result<Token, ParseError> {
    let digits = take_while(characters, |c| c.is_ascii_digit());
    digits
        .parse::<i32>()
        .map(Token::LiteralInteger)
        .map_err(|_| ParseError::NumberTooLarge(digits))
}

fn read_identifier(characters: &mut Peekable<CharIndices>) -> Token {
    Token::Identifier(take_while(characters, is_identifier_part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn correct_expression_returns_tokens() {
        let tokens = tokenize("(a + 12) / b_2").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::LeftParentheses,
                Token::Identifier("a".to_string()),
                Token::Plus,
                Token::LiteralInteger(12),
                Token::RightParentheses,
                Token::ForwardSlash,
                Token::Identifier("b_2".to_string()),
            ]
        )
    }

    #[test]
    fn whitespace_is_optional_between_tokens() {
        assert_eq!(tokenize("3+4*x").unwrap(), tokenize(" 3 + 4 * x ").unwrap());
    }

    #[test]
    fn digits_followed_by_letters_are_separate_tokens() {
        let tokens = tokenize("2x").unwrap();

        assert_eq!(
            tokens,
            vec![Token::LiteralInteger(2), Token::Identifier("x".to_string())]
        )
    }

    #[test]
    fn empty_expression_returns_no_tokens() {
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn unknown_character_returns_err() {
        let error = tokenize("1 + 2 % 3").unwrap_err();

        assert_eq!(
            error,
            ParseError::UnexpectedCharacter {
                character: '%',
                position: 6
            }
        )
    }

    #[test]
    fn too_large_number_returns_err() {
        let error = tokenize("99999999999").unwrap_err();

        assert_eq!(error, ParseError::NumberTooLarge("99999999999".to_string()))
    }
}
