const MAX_SYMBOL_LEN: usize = 20;
const MAX_QUERY_LEN: usize = 64;

/// Ticker as accepted in a URL path: `BRK.B`, `^GSPC`, `BTC-USD`.
pub fn sanitize_ticker(ticker: String) -> String {
    return ticker
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '^'))
        .take(MAX_SYMBOL_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();
}

pub fn sanitize_query(query: &str) -> String {
    return query
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_QUERY_LEN)
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_ticker_pass_no_harm() {
        let result = sanitize_ticker("AAPL".to_string());
        assert_eq!(result, "AAPL".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_uppercase() {
        let result = sanitize_ticker("tsla".to_string());
        assert_eq!(result, "TSLA".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_delimiters() {
        let result = sanitize_ticker("brk.b-^_".to_string());
        assert_eq!(result, "BRK.B-^_".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_remove_junk() {
        let result = sanitize_ticker("AA/../PL?apikey=x".to_string());
        assert_eq!(result, "AA..PLAPIKEYX".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_max_len() {
        let result = sanitize_ticker("ABCDEFGHIJABCDEFGHIJK".to_string());
        assert_eq!(result, "ABCDEFGHIJABCDEFGHIJ".to_string());
    }

    #[test]
    fn sanitize_query_pass_keeps_spaces() {
        assert_eq!(sanitize_query("Tesla Inc"), "Tesla Inc");
        assert_eq!(sanitize_query(""), "");
    }

    #[test]
    fn sanitize_query_pass_strips_control_and_truncates() {
        assert_eq!(sanitize_query("te\nsla\u{7}"), "tesla");
        assert_eq!(sanitize_query(&"x".repeat(100)).len(), 64);
    }
}
