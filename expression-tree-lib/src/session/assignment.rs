use crate::session::error::AssignmentError;

/// Splits a `key=value` assignment into its name and value.
///
/// All spaces are removed first, so `" x = 5 "` and `"x=5"` are the same assignment. Other
/// whitespace is kept. The value is read like C's `atoi`: leading whitespace, an optional
/// sign and then leading digits, with anything after them ignored and `0` when there are
/// none. Values beyond the range of an `i32` saturate.
///
/// # Examples
///
/// ```
/// use expression_tree::session::assignment::parse_assignment;
///
/// assert_eq!(parse_assignment(" x = 5 "), Ok(("x".to_string(), 5)));
/// assert_eq!(parse_assignment("x=12abc"), Ok(("x".to_string(), 12)));
/// ```
pub fn parse_assignment(assignment: &str) -> Result<(String, i32), AssignmentError> {
    let input: String = assignment.chars().filter(|c| *c != ' ').collect();

    let position = input
        .find('=')
        .ok_or_else(|| AssignmentError::MissingOperator(assignment.to_string()))?;
    let (key, value) = (&input[..position], &input[position + 1..]);

    if key.is_empty() || value.is_empty() || value.contains('=') {
        return Err(AssignmentError::Malformed(assignment.to_string()));
    }

    Ok((key.to_string(), parse_leading_integer(value)))
}

fn parse_leading_integer(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |total, digit| {
            (total * 10 + i64::from(digit - b'0')).min(i64::from(i32::MAX) + 1)
        });
    let value = if negative { -magnitude } else { magnitude };

    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
