use std::fmt::Display;

/// The category a lexed span of text is highlighted as.
///
/// Categories form a dotted hierarchy (see [`TokenCategory::path`]) so a
/// renderer can style a whole family, every `Literal.Number.*` say, at once.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenCategory {
    Comment,
    CommentMultiline,

    NumberInteger,
    NumberFloat,
    NumberBin,
    NumberOct,
    NumberHex,
    // array, hash and bitset elements
    NumberLiteralInContainer,

    StringLiteral,
    StringChar,
    StringSymbol,
    StringDouble,
    StringInterpolatedDelimiter,

    Constant,
    Keyword,
    Operator,
    Punctuation,

    NameVariable,
    NameFunction,
    NameFunctionMagic,
    NameBuiltin,

    GenericPrompt,
    GenericOutput,

    PlainText,
}

impl TokenCategory {
    pub fn path(&self) -> &'static str {
        match self {
            TokenCategory::Comment => "Comment",
            TokenCategory::CommentMultiline => "Comment.Multiline",
            TokenCategory::NumberInteger => "Literal.Number.Integer",
            TokenCategory::NumberFloat => "Literal.Number.Float",
            TokenCategory::NumberBin => "Literal.Number.Bin",
            TokenCategory::NumberOct => "Literal.Number.Oct",
            TokenCategory::NumberHex => "Literal.Number.Hex",
            TokenCategory::NumberLiteralInContainer => "Literal.Number",
            TokenCategory::StringLiteral => "Literal.String",
            TokenCategory::StringChar => "Literal.String.Char",
            TokenCategory::StringSymbol => "Literal.String.Symbol",
            TokenCategory::StringDouble => "Literal.String.Double",
            TokenCategory::StringInterpolatedDelimiter => "Literal.String.Interpol",
            TokenCategory::Constant => "Name.Constant",
            TokenCategory::Keyword => "Keyword.Pseudo",
            TokenCategory::Operator => "Operator",
            TokenCategory::Punctuation => "Punctuation",
            TokenCategory::NameVariable => "Name.Variable",
            TokenCategory::NameFunction => "Name.Function",
            TokenCategory::NameFunctionMagic => "Name.Function.Magic",
            TokenCategory::NameBuiltin => "Name.Builtin",
            TokenCategory::GenericPrompt => "Generic.Prompt",
            TokenCategory::GenericOutput => "Generic.Output",
            TokenCategory::PlainText => "Text",
        }
    }

    /// Whether this category sits at or below `family` in the hierarchy.
    ///
    /// Matching is by whole path components: `NameFunctionMagic` is a
    /// `"Name.Function"` but `NameFunction` is not a `"Name.Func"`.
    pub fn is_a(&self, family: &str) -> bool {
        let path = self.path();

        match path.strip_prefix(family) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token.{}", self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub category: TokenCategory,
    pub text: &'a str,
    /// Byte offset of `text` in the buffer that was lexed.
    pub start: usize,
}

impl<'a> Token<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_one_of_many(&self, categories: &[TokenCategory]) -> bool {
        categories.contains(&self.category)
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{:?}", self.start, self.category, self.text)
    }
}
