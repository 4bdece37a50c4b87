//! CSS selector subset used by element lookup.
//!
//! Supported: type (`div`), universal (`*`), id (`#main`), class (`.item`),
//! attribute presence and equality (`[href]`, `[type="text"]`), the
//! descendant and child (`>`) combinators, and comma-separated lists.

use xguard_types::Failure;

use super::document::{Document, ElementData, NodeId};

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeSelector {
    name: String,
    value: Option<String>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, Failure> {
        let mut parser = Parser {
            input,
            chars: input.chars().collect(),
            pos: 0,
        };
        parser.parse_list()
    }

    /// Whether the element `id` in `document` matches any selector.
    pub fn matches(&self, document: &Document, id: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|selector| selector.matches_at(document, id, selector.compounds.len() - 1))
    }
}

impl ComplexSelector {
    fn matches_at(&self, document: &Document, id: NodeId, index: usize) -> bool {
        let Some(element) = document.element(id) else {
            return false;
        };
        if !self.compounds[index].matches(element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => document
                .parent_element(id)
                .is_some_and(|parent| self.matches_at(document, parent, index - 1)),
            Combinator::Descendant => {
                let mut ancestor = document.parent_element(id);
                while let Some(candidate) = ancestor {
                    if self.matches_at(document, candidate, index - 1) {
                        return true;
                    }
                    ancestor = document.parent_element(candidate);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !element.matches_tag(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attributes.iter().all(|attr| {
            match (element.get_attribute(&attr.name), &attr.value) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
            }
        })
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn parse_list(&mut self) -> Result<SelectorList, Failure> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(_) => return Err(self.invalid()),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, Failure> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(_) => return Err(self.invalid()),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, Failure> {
        let mut compound = CompoundSelector::default();
        let mut empty = true;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                empty = false;
            }
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.parse_ident()?);
                empty = false;
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.parse_ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
            empty = false;
        }

        if empty {
            return Err(self.invalid());
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, Failure> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let value = match self.peek() {
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => self.parse_quoted(quote)?,
                    _ => self.parse_ident()?,
                };
                self.skip_whitespace();
                Some(value)
            }
            _ => None,
        };

        if self.peek() != Some(']') {
            return Err(self.invalid());
        }
        self.pos += 1;
        Ok(AttributeSelector { name, value })
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, Failure> {
        self.pos += 1;
        let mut value = String::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == quote {
                return Ok(value);
            }
            value.push(c);
        }
        Err(self.invalid())
    }

    fn parse_ident(&mut self) -> Result<String, Failure> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.invalid());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn invalid(&self) -> Failure {
        Failure::syntax(format!("'{}' is not a valid selector", self.input))
            .with_input(self.input)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;
    use xguard_types::FailureKind;

    fn sample() -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let html = doc.append_element(Document::ROOT, "html", &[]);
        let body = doc.append_element(html, "body", &[]);
        let nav = doc.append_element(body, "nav", &[("id", "menu"), ("class", "bar top")]);
        let link = doc.append_element(nav, "a", &[("href", "/home"), ("class", "item")]);
        let main = doc.append_element(body, "main", &[]);
        let section = doc.append_element(main, "section", &[]);
        let input = doc.append_element(section, "input", &[("type", "text"), ("name", "q")]);
        (doc, vec![html, body, nav, link, main, section, input])
    }

    fn matches(selector: &str, doc: &Document, id: NodeId) -> bool {
        SelectorList::parse(selector).unwrap().matches(doc, id)
    }

    #[test]
    fn test_simple_selectors() {
        let (doc, ids) = sample();
        let (nav, link, input) = (ids[2], ids[3], ids[6]);
        assert!(matches("nav", &doc, nav));
        assert!(matches("NAV", &doc, nav));
        assert!(matches("#menu", &doc, nav));
        assert!(matches(".bar.top", &doc, nav));
        assert!(matches("*", &doc, link));
        assert!(matches("[href]", &doc, link));
        assert!(matches("input[type=\"text\"]", &doc, input));
        assert!(matches("input[type='text'][name=q]", &doc, input));
        assert!(!matches("input[type=password]", &doc, input));
        assert!(!matches(".bar.bottom", &doc, nav));
    }

    #[test]
    fn test_combinators() {
        let (doc, ids) = sample();
        let (link, input) = (ids[3], ids[6]);
        assert!(matches("body a", &doc, link));
        assert!(matches("#menu > a.item", &doc, link));
        assert!(!matches("body > a", &doc, link));
        assert!(matches("main section > input", &doc, input));
        assert!(matches("html main input", &doc, input));
        assert!(!matches("nav input", &doc, input));
    }

    #[test]
    fn test_selector_list() {
        let (doc, ids) = sample();
        assert!(matches("footer, a", &doc, ids[3]));
        assert!(!matches("footer, aside", &doc, ids[3]));
    }

    #[test]
    fn test_invalid_selectors() {
        for selector in ["", "   ", "#", ".", "a >", "a,", "[href", "a[=x]", "a!", "[x='y]"] {
            let err = SelectorList::parse(selector).unwrap_err();
            assert_eq!(err.kind, FailureKind::Syntax, "selector {:?}", selector);
        }
    }

    #[test]
    fn test_invalid_message_names_selector() {
        let err = SelectorList::parse("div >> p").unwrap_err();
        assert_eq!(err.message, "'div >> p' is not a valid selector");
    }
}
