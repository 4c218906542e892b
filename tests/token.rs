use libshell::config::MAX_TOKENS;
use libshell::error::Error;
use libshell::token::tokenize;

#[test]
fn delimiter_only_lines_yield_nothing() {
    for line in ["", " ", "  \t ", "\r\n", "\0\0", " \t\r\n\0"] {
        let tokens = tokenize(line).unwrap();
        assert!(tokens.is_empty(), "expected no tokens for {:?}", line);
    }
}

#[test]
fn plain_split() {
    let tokens = tokenize("set bar 5").unwrap();
    assert_eq!(tokens.as_slice(), &["set", "bar", "5"]);
}

#[test]
fn double_quoted_span_keeps_delimiters() {
    let tokens = tokenize(r#""foo bar" baz"#).unwrap();
    assert_eq!(tokens.as_slice(), &["foo bar", "baz"]);
}

#[test]
fn single_quotes_preserve_double_quotes() {
    let tokens = tokenize(r#"'a"b' c"#).unwrap();
    assert_eq!(tokens.as_slice(), &["a\"b", "c"]);
}

#[test]
fn quoted_span_may_cover_several_raw_tokens() {
    let tokens = tokenize("say \"one  two\tthree\" done").unwrap();
    assert_eq!(tokens.as_slice(), &["say", "one  two\tthree", "done"]);
}

#[test]
fn unterminated_quote_yields_no_token_for_the_span() {
    let tokens = tokenize("'open").unwrap();
    assert!(tokens.is_empty());

    let tokens = tokenize("cmd 'open ended").unwrap();
    assert_eq!(tokens.as_slice(), &["cmd"]);
}

#[test]
fn lone_quote_is_an_unterminated_span() {
    let tokens = tokenize("\"").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn closing_quote_must_end_a_raw_token() {
    // The quote after "b" is mid-token, so the span never closes.
    let tokens = tokenize("a \"b\"c").unwrap();
    assert_eq!(tokens.as_slice(), &["a"]);
}

#[test]
fn token_capacity_is_a_hard_limit() {
    let mut line = std::string::String::new();
    for i in 0..MAX_TOKENS {
        line.push_str("t");
        line.push_str(&i.to_string());
        line.push(' ');
    }
    assert_eq!(tokenize(&line).unwrap().len(), MAX_TOKENS);

    line.push_str("overflow");
    assert_eq!(tokenize(&line), Err(Error::BufferExhausted));
}
