//! Selector Parser
//!
//! Hand-written recursive descent over the selector text. CSS escapes in
//! identifiers and strings are decoded, so `#\31 23` selects `id="123"`.

use crate::SelectorError;
use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList,
};

/// Parse a comma-separated selector list
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let mut parser = Parser { input, pos: 0 };
    let mut selectors = vec![parser.complex()?];

    loop {
        parser.skip_whitespace();
        match parser.peek() {
            None => break,
            Some(',') => {
                parser.bump();
                selectors.push(parser.complex()?);
            }
            Some(c) => return Err(parser.unexpected(c)),
        }
    }

    Ok(SelectorList { selectors })
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::Unexpected {
            found,
            offset: self.pos,
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), SelectorError> {
        match self.bump() {
            Some(c) if c == wanted => Ok(()),
            Some(c) => Err(SelectorError::Unexpected {
                found: c,
                offset: self.pos - c.len_utf8(),
            }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    /// Skip whitespace, reporting whether any was consumed
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.bump();
        }
        self.pos != start
    }

    fn complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(_) if had_space => Combinator::Descendant,
                Some(c) => return Err(self.unexpected(c)),
            };
            if combinator != Combinator::Descendant {
                self.bump();
                self.skip_whitespace();
            }
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        match self.peek() {
            Some('*') => {
                self.bump();
                components.push(SelectorComponent::Universal);
            }
            Some(c) if starts_ident(c, self.peek_second()) => {
                components.push(SelectorComponent::Type(self.ident()?.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    components.push(SelectorComponent::Id(self.name()?));
                }
                Some('.') => {
                    self.bump();
                    components.push(SelectorComponent::Class(self.ident()?));
                }
                Some('[') => {
                    self.bump();
                    components.push(SelectorComponent::Attribute(self.attribute()?));
                }
                Some(':') => {
                    self.bump();
                    components.push(SelectorComponent::PseudoClass(self.pseudo_class()?));
                }
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => SelectorError::UnexpectedEnd,
            });
        }
        Ok(CompoundSelector { components })
    }

    /// Identifier that must start like an ident
    fn ident(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(c) if starts_ident(c, self.peek_second()) => self.name(),
            Some(c) => Err(self.unexpected(c)),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }

    /// Run of name code points and escapes (hash tokens may start with a digit)
    fn name(&mut self) -> Result<String, SelectorError> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                out.push(self.escape()?);
            } else if is_name_char(c) {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if out.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => SelectorError::UnexpectedEnd,
            });
        }
        Ok(out)
    }

    /// Decode an escape; the backslash is already consumed
    fn escape(&mut self) -> Result<char, SelectorError> {
        let Some(first) = self.peek() else {
            return Err(SelectorError::UnexpectedEnd);
        };
        if !first.is_ascii_hexdigit() {
            self.bump();
            return Ok(first);
        }

        let mut hex = String::new();
        while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            hex.extend(self.bump());
        }
        // One whitespace after a hex escape belongs to the escape
        if self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.bump();
        }

        let code = u32::from_str_radix(&hex, 16).unwrap_or(0);
        Ok(match char::from_u32(code) {
            Some(c) if code != 0 => c,
            _ => char::REPLACEMENT_CHARACTER,
        })
    }

    fn string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(SelectorError::UnterminatedString),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.peek() {
                    None => return Err(SelectorError::UnterminatedString),
                    Some('\n') => {
                        self.bump();
                    }
                    Some(_) => out.push(self.escape()?),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                    case_insensitive: false,
                });
            }
            Some('=') => {
                self.bump();
                '='
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.bump();
                self.expect('=')?;
                c
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(SelectorError::UnterminatedAttribute),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                self.string(q)?
            }
            Some(_) => self.ident()?,
            None => return Err(SelectorError::UnterminatedAttribute),
        };
        self.skip_whitespace();

        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            self.bump();
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            self.skip_whitespace();
        }

        match self.bump() {
            Some(']') => {}
            Some(c) => {
                return Err(SelectorError::Unexpected {
                    found: c,
                    offset: self.pos - c.len_utf8(),
                });
            }
            None => return Err(SelectorError::UnterminatedAttribute),
        }

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };

        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn pseudo_class(&mut self) -> Result<PseudoClass, SelectorError> {
        if self.peek() == Some(':') {
            // Pseudo-elements never match an element node
            return Err(SelectorError::UnsupportedPseudo(format!(
                ":{}",
                &self.input[self.pos..]
            )));
        }
        let name = self.ident()?.to_ascii_lowercase();

        if self.peek() != Some('(') {
            return match name.as_str() {
                "root" => Ok(PseudoClass::Root),
                "empty" => Ok(PseudoClass::Empty),
                "first-child" => Ok(PseudoClass::FirstChild),
                "last-child" => Ok(PseudoClass::LastChild),
                "only-child" => Ok(PseudoClass::OnlyChild),
                "first-of-type" => Ok(PseudoClass::FirstOfType),
                "last-of-type" => Ok(PseudoClass::LastOfType),
                "only-of-type" => Ok(PseudoClass::OnlyOfType),
                _ => Err(SelectorError::UnsupportedPseudo(name)),
            };
        }
        self.bump();

        if name == "not" {
            self.skip_whitespace();
            let inner = self.compound()?;
            self.skip_whitespace();
            self.expect(')')?;
            return Ok(PseudoClass::Not(inner));
        }

        let start = self.pos;
        let end = self.input[start..]
            .find(')')
            .map(|i| start + i)
            .ok_or(SelectorError::UnexpectedEnd)?;
        let arg = &self.input[start..end];
        self.pos = end + 1;

        let expr = NthExpression::parse(arg).ok_or_else(|| SelectorError::InvalidNth(arg.trim().to_string()))?;
        match name.as_str() {
            "nth-child" => Ok(PseudoClass::NthChild(expr)),
            "nth-last-child" => Ok(PseudoClass::NthLastChild(expr)),
            "nth-of-type" => Ok(PseudoClass::NthOfType(expr)),
            "nth-last-of-type" => Ok(PseudoClass::NthLastOfType(expr)),
            _ => Err(SelectorError::UnsupportedPseudo(name)),
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

/// Would an identifier start at `c` (followed by `next`)?
fn starts_ident(c: char, next: Option<char>) -> bool {
    match c {
        '-' => next.is_some_and(|n| is_name_start(n) || n == '-' || n == '\\'),
        '\\' => true,
        c => is_name_start(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(input: &str) -> ComplexSelector {
        let mut list = parse_selector_list(input).unwrap();
        assert_eq!(list.selectors.len(), 1);
        list.selectors.remove(0)
    }

    #[test]
    fn test_parse_compound() {
        let sel = single("div#main.box[role=\"nav\"]");
        assert_eq!(sel.compounds.len(), 1);
        let parts = &sel.compounds[0].components;
        assert_eq!(parts[0], SelectorComponent::Type("div".into()));
        assert_eq!(parts[1], SelectorComponent::Id("main".into()));
        assert_eq!(parts[2], SelectorComponent::Class("box".into()));
        assert!(matches!(&parts[3], SelectorComponent::Attribute(a) if a.name == "role"));
    }

    #[test]
    fn test_parse_combinators() {
        let sel = single("ul > li a");
        assert_eq!(sel.compounds.len(), 3);
        assert_eq!(sel.combinators, vec![Combinator::Child, Combinator::Descendant]);

        let tight = single("ul>li+li~li");
        assert_eq!(
            tight.combinators,
            vec![Combinator::Child, Combinator::NextSibling, Combinator::SubsequentSibling]
        );
    }

    #[test]
    fn test_parse_nth() {
        let sel = single("li:nth-of-type(2)");
        assert_eq!(
            sel.compounds[0].components[1],
            SelectorComponent::PseudoClass(PseudoClass::NthOfType(NthExpression::index(2)))
        );
        let sel = single("tr:nth-child( 2n + 1 )");
        assert_eq!(
            sel.compounds[0].components[1],
            SelectorComponent::PseudoClass(PseudoClass::NthChild(NthExpression::new(2, 1)))
        );
    }

    #[test]
    fn test_parse_escapes() {
        let sel = single("#\\31 23");
        assert_eq!(sel.compounds[0].components[0], SelectorComponent::Id("123".into()));

        let sel = single(".a\\:b");
        assert_eq!(sel.compounds[0].components[0], SelectorComponent::Class("a:b".into()));

        let sel = single("[title=\"say \\\"hi\\\"\"]");
        let SelectorComponent::Attribute(attr) = &sel.compounds[0].components[0] else {
            panic!("expected attribute");
        };
        assert_eq!(attr.matcher, Some(AttributeMatcher::Exact("say \"hi\"".into())));
    }

    #[test]
    fn test_parse_list() {
        let list = parse_selector_list("a, b > c").unwrap();
        assert_eq!(list.selectors.len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_selector_list(""), Err(SelectorError::Empty));
        assert_eq!(parse_selector_list("a,"), Err(SelectorError::Empty));
        assert!(matches!(parse_selector_list("div >"), Err(SelectorError::UnexpectedEnd)));
        assert_eq!(
            parse_selector_list("[a=\"b]"),
            Err(SelectorError::UnterminatedString)
        );
        assert!(matches!(
            parse_selector_list("a:hover"),
            Err(SelectorError::UnsupportedPseudo(_))
        ));
        assert!(matches!(
            parse_selector_list("li:nth-child(x)"),
            Err(SelectorError::InvalidNth(_))
        ));
    }
}
