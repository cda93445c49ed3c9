use super::{InvalidComponent, SignatureHeader, SignedHeaders};
use logos::{Lexer, Logos, Span};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

const SUPPORTED_ALGORITHMS: &[&str] = &["rsa-sha256", "hs2019"];

/// Signature header parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    /// A required field is present but empty
    #[error("Field `{0}` is empty")]
    #[diagnostic(code(verisig::parse::empty_field))]
    EmptyField(&'static str),

    /// The `headers` field names something that can't be signed
    #[error(transparent)]
    #[diagnostic(code(verisig::parse::invalid_component))]
    InvalidComponent(#[from] InvalidComponent),

    /// The signature isn't valid Base64
    #[error("Signature isn't valid Base64")]
    #[diagnostic(code(verisig::parse::invalid_signature_encoding))]
    InvalidSignatureEncoding,

    /// The header value contains bytes that aren't visible ASCII
    #[error("Header value isn't visible ASCII")]
    #[diagnostic(code(verisig::parse::non_ascii))]
    NonAscii,

    /// A required field is missing
    #[error("Missing field `{0}`")]
    #[diagnostic(code(verisig::parse::missing_field))]
    MissingField(&'static str),

    /// The input ended in the middle of a `name="value"` pair
    #[error("Unexpected end of input")]
    #[diagnostic(code(verisig::parse::unexpected_end))]
    UnexpectedEnd,

    /// The input contains a token that isn't allowed at this position
    #[error("Unexpected token")]
    #[diagnostic(code(verisig::parse::unexpected_token))]
    UnexpectedToken {
        /// Location of the token
        #[label("this isn't valid here")]
        span: SourceSpan,
    },

    /// The algorithm isn't RSA-SHA256
    #[error("Unsupported algorithm `{0}`")]
    #[diagnostic(
        code(verisig::parse::unsupported_algorithm),
        help("only `rsa-sha256` (and `hs2019` with an RSA key) are supported")
    )]
    UnsupportedAlgorithm(String),
}

#[derive(Debug, Logos)]
#[logos(skip r"[ \t]+")]
enum TokenTy {
    #[regex(r"[A-Za-z][A-Za-z0-9_-]*")]
    Key,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    Value,

    #[regex(r"[0-9]+")]
    Number,

    #[token(",")]
    Comma,
}

#[derive(Debug)]
struct Token {
    pub ty: TokenTy,
    pub span: Span,
}

impl Token {
    pub fn parse(input: &str) -> impl Iterator<Item = Result<Token, Span>> + '_ {
        Lexer::<'_, TokenTy>::new(input)
            .spanned()
            .map(|(ty, span)| match ty {
                Ok(ty) => Ok(Token { ty, span }),
                Err(()) => Err(span),
            })
    }
}

macro_rules! expect {
    ($self:expr, $pattern:pat) => {{
        let next = match $self.inner.next() {
            Some(Ok(token)) if matches!(token.ty, $pattern) => Ok(token),
            Some(Ok(token)) => Err(ParseError::UnexpectedToken {
                span: token.span.into(),
            }),
            Some(Err(span)) => Err(ParseError::UnexpectedToken { span: span.into() }),
            None => Err(ParseError::UnexpectedEnd),
        };

        match next {
            Ok(token) => token,
            Err(error) => {
                $self.is_broken = true;
                return Some(Err(error));
            }
        }
    }};
}

struct ParseIter<'a, I> {
    /// Stream of tokens wrapped into a result
    inner: I,

    /// Reference to the original input that was fed to the lexer
    input: &'a str,

    /// Marker whether we encountered any error or illegal token
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,
}

impl<'a, I> Iterator for ParseIter<'a, I>
where
    I: Iterator<Item = Result<Token, Span>>,
{
    type Item = Result<(&'a str, &'a str), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        // End of input (or a trailing comma) ends the list
        let key = match self.inner.next()? {
            Ok(token) if matches!(token.ty, TokenTy::Key) => token,
            Ok(Token { span, .. }) | Err(span) => {
                self.is_broken = true;
                return Some(Err(ParseError::UnexpectedToken { span: span.into() }));
            }
        };
        expect!(self, TokenTy::Equals);
        let value = expect!(self, TokenTy::Value | TokenTy::Number);

        match self.inner.next() {
            None | Some(Ok(Token {
                ty: TokenTy::Comma,
                ..
            })) => {}
            Some(Ok(Token { span, .. }) | Err(span)) => {
                self.is_broken = true;
                return Some(Err(ParseError::UnexpectedToken { span: span.into() }));
            }
        }

        let key = &self.input[key.span];
        let value = self.input[value.span].trim_matches('"');

        Some(Ok((key, value)))
    }
}

#[inline]
fn non_empty<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, ParseError> {
    match value {
        Some("") => Err(ParseError::EmptyField(name)),
        Some(value) => Ok(value),
        None => Err(ParseError::MissingField(name)),
    }
}

/// Parse a cavage `Signature` header into its fields with proper error handling
///
/// `keyId`, `algorithm`, `headers` and `signature` are required and must be non-empty.
/// Unknown fields are ignored.
#[inline]
pub fn parse(input: &str) -> Result<SignatureHeader<'_>, ParseError> {
    let kv_iter = ParseIter {
        inner: Token::parse(input),
        input,
        is_broken: false,
    };

    let mut key_id = None;
    let mut algorithm = None;
    let mut headers = None;
    let mut signature = None;

    for kv in kv_iter {
        let (key, value) = kv?;

        match key {
            "keyId" => key_id = Some(value),
            "algorithm" => algorithm = Some(value),
            "headers" => headers = Some(value),
            "signature" => signature = Some(value),
            _ => {}
        }
    }

    let key_id = non_empty(key_id, "keyId")?;
    let algorithm = non_empty(algorithm, "algorithm")?;
    let headers: SignedHeaders = non_empty(headers, "headers")?.parse()?;
    let signature = non_empty(signature, "signature")?;

    if !SUPPORTED_ALGORITHMS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(algorithm))
    {
        return Err(ParseError::UnsupportedAlgorithm(algorithm.to_string()));
    }

    // `headers="   "` splits into nothing
    if headers.is_empty() {
        return Err(ParseError::EmptyField("headers"));
    }

    Ok(SignatureHeader {
        key_id,
        algorithm,
        headers,
        signature,
    })
}
