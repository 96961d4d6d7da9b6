// Selectors, targets and per-page selector maps
//
// A `Selector` is one locator expression. A `Target` chains selectors and
// indices into a single Playwright selector string ("a >> b >> nth=1"), which
// is how parent-relative and indexed lookups are expressed. A `SelectorMap`
// is the fixed name -> selector table owned by each page object.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// A single locator expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector, including attribute matches (`a[onclick*="addToCart"]`)
    Css(String),
    /// Exact, case-sensitive visible text
    Text(String),
}

impl Selector {
    /// `#id`
    pub fn id(id: &str) -> Self {
        Selector::Css(format!("#{}", id))
    }

    /// Any CSS selector.
    pub fn css(css: impl Into<String>) -> Self {
        Selector::Css(css.into())
    }

    /// Element whose visible text is exactly `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Selector::Text(text.into())
    }

    /// `tag[attr*="value"]`
    pub fn attr_contains(tag: &str, attr: &str, value: &str) -> Self {
        Selector::Css(format!("{}[{}*=\"{}\"]", tag, attr, escape_quotes(value)))
    }

    /// `tag[attr="value"]`
    pub fn attr_equals(tag: &str, attr: &str, value: &str) -> Self {
        Selector::Css(format!("{}[{}=\"{}\"]", tag, attr, escape_quotes(value)))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(css) => f.write_str(css),
            // Quoted form is Playwright's exact, case-sensitive text engine
            Selector::Text(text) => write!(f, "text=\"{}\"", escape_quotes(text)),
        }
    }
}

pub(crate) fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Step {
    Select(Selector),
    Nth(usize),
}

/// A resolved locator: a chain of selectors, each scoped to the previous
/// step's matches, optionally narrowed to one match by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    steps: Vec<Step>,
}

impl Target {
    /// Creates a target from a single selector.
    pub fn new(selector: Selector) -> Self {
        Self {
            steps: vec![Step::Select(selector)],
        }
    }

    /// Looks up `selector` inside the elements matched so far.
    pub fn child(mut self, selector: Selector) -> Self {
        self.steps.push(Step::Select(selector));
        self
    }

    /// Narrows to the zero-based `index`-th match.
    pub fn nth(mut self, index: usize) -> Self {
        self.steps.push(Step::Nth(index));
        self
    }

    /// Narrows to the first match.
    pub fn first(self) -> Self {
        self.nth(0)
    }

    /// Returns the index this target was narrowed to, if its last step is one.
    pub fn index(&self) -> Option<usize> {
        match self.steps.last() {
            Some(Step::Nth(index)) => Some(*index),
            _ => None,
        }
    }

    /// Returns the target without its trailing index step.
    pub fn without_index(&self) -> Target {
        let mut steps = self.steps.clone();
        if matches!(steps.last(), Some(Step::Nth(_))) {
            steps.pop();
        }
        Target { steps }
    }
}

impl From<Selector> for Target {
    fn from(selector: Selector) -> Self {
        Target::new(selector)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            match step {
                Step::Select(selector) => write!(f, "{}", selector)?,
                Step::Nth(index) => write!(f, "nth={}", index)?,
            }
        }
        Ok(())
    }
}

/// Fixed mapping from semantic field name to selector for one page object.
///
/// Built once with the consuming `with` builder; there are no mutators, so
/// the selectors never change for the lifetime of the page object.
#[derive(Debug, Clone)]
pub struct SelectorMap {
    page: &'static str,
    entries: BTreeMap<&'static str, Selector>,
}

impl SelectorMap {
    /// Starts an empty map for the named page.
    pub fn new(page: &'static str) -> Self {
        Self {
            page,
            entries: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) an entry.
    pub fn with(mut self, name: &'static str, selector: Selector) -> Self {
        self.entries.insert(name, selector);
        self
    }

    /// Name of the page this map belongs to.
    pub fn page(&self) -> &'static str {
        self.page
    }

    /// Returns the selector registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Selector> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::UnknownSelector {
                page: self.page,
                name: name.to_string(),
            })
    }

    /// Returns a fresh target for the selector registered under `name`.
    pub fn target(&self, name: &str) -> Result<Target> {
        self.get(name).cloned().map(Target::new)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}
