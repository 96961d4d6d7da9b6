// Scripted session
//
// An in-memory stand-in for a browser page. The document is a table from
// rendered target string to the elements it matches; clicks and navigations
// fire scripted reactions (show/hide/insert/remove elements, raise native
// dialogs). Every call is recorded so tests can assert on the exact sequence
// a page object issued.

use crate::dialog::{DialogKind, DialogResponse, DialogRouter};
use crate::driver::Session;
use crate::error::{Error, Result};
use crate::selector::Target;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// One element of the scripted document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub visible: bool,
    pub text: Option<String>,
    pub value: String,
    pub attributes: HashMap<String, String>,
}

impl Element {
    pub fn visible() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Document change fired by a click or navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Make every element under the key visible
    Show(String),
    /// Make every element under the key invisible
    Hide(String),
    /// Append an element under the key
    Insert(String, Element),
    /// Remove the element at the index under the key, if present
    Remove(String, usize),
    /// Remove every element under the key
    Clear(String),
    /// Raise a native dialog
    Dialog(DialogKind, String),
    /// Navigate to a path, firing its navigation reactions
    Navigate(String),
}

/// A call recorded by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Goto(String),
    Click(String),
    Fill(String, String),
    Dialog(DialogKind, String, DialogResponse),
}

#[derive(Default)]
struct Document {
    url: Option<Url>,
    elements: HashMap<String, Vec<Element>>,
    click_reactions: HashMap<String, Vec<Reaction>>,
    goto_reactions: HashMap<String, Vec<Reaction>>,
    actions: Vec<Action>,
}

impl Document {
    fn matches(&self, target: &Target) -> Vec<&Element> {
        let key = target.without_index().to_string();
        let all = self.elements.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        match target.index() {
            Some(index) => all.get(index).into_iter().collect(),
            None => all.iter().collect(),
        }
    }

    fn single(&self, target: &Target) -> Result<&Element> {
        let matches = self.matches(target);
        match matches.len() {
            0 => Err(Error::ElementNotFound(target.to_string())),
            1 => Ok(matches[0]),
            count => Err(Error::StrictModeViolation {
                selector: target.to_string(),
                count,
            }),
        }
    }

    fn single_mut(&mut self, target: &Target) -> Result<&mut Element> {
        self.single(target)?;
        let key = target.without_index().to_string();
        let index = target.index().unwrap_or(0);
        self.elements
            .get_mut(&key)
            .and_then(|all| all.get_mut(index))
            .ok_or_else(|| Error::ElementNotFound(target.to_string()))
    }

    fn reactions_for_click(&self, target: &Target) -> Vec<Reaction> {
        self.click_reactions
            .get(&target.to_string())
            .or_else(|| self.click_reactions.get(&target.without_index().to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

/// In-memory [`Session`] driven by a script.
pub struct ScriptedSession {
    base_url: Url,
    dialogs: DialogRouter,
    document: Mutex<Document>,
    poll_interval: Duration,
}

impl ScriptedSession {
    /// Creates an empty document served from `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            dialogs: DialogRouter::new(),
            document: Mutex::new(Document::default()),
            poll_interval: Duration::from_millis(5),
        })
    }

    /// Adds an element matched by `key` (a rendered target string).
    pub fn with_element(self, key: impl Into<String>, element: Element) -> Self {
        self.document
            .lock()
            .elements
            .entry(key.into())
            .or_default()
            .push(element);
        self
    }

    /// Fires `reaction` whenever the target rendered as `key` is clicked.
    ///
    /// Reactions registered for an un-indexed key also fire for clicks on
    /// any of its indexed forms.
    pub fn on_click(self, key: impl Into<String>, reaction: Reaction) -> Self {
        self.document
            .lock()
            .click_reactions
            .entry(key.into())
            .or_default()
            .push(reaction);
        self
    }

    /// Fires `reaction` whenever the session navigates to `path`.
    pub fn on_goto(self, path: impl Into<String>, reaction: Reaction) -> Self {
        self.document
            .lock()
            .goto_reactions
            .entry(path.into())
            .or_default()
            .push(reaction);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Every call made so far, in order.
    pub fn actions(&self) -> Vec<Action> {
        self.document.lock().actions.clone()
    }

    /// Current URL, if the session has navigated.
    pub fn url(&self) -> Option<Url> {
        self.document.lock().url.clone()
    }

    /// Snapshot of the element at `index` under `key`.
    pub fn element(&self, key: &str, index: usize) -> Option<Element> {
        self.document
            .lock()
            .elements
            .get(key)
            .and_then(|all| all.get(index))
            .cloned()
    }

    fn navigate(&self, path: &str) -> Result<Vec<Reaction>> {
        let url = self.base_url.join(path)?;
        let mut document = self.document.lock();
        document.actions.push(Action::Goto(url.path().to_string()));
        let reactions = document
            .goto_reactions
            .get(url.path())
            .cloned()
            .unwrap_or_default();
        document.url = Some(url);
        Ok(reactions)
    }

    fn apply(&self, reactions: Vec<Reaction>) -> Result<()> {
        for reaction in reactions {
            match reaction {
                Reaction::Dialog(kind, message) => {
                    // Router lock is taken outside the document lock
                    let response = self.dialogs.dispatch(kind, &message);
                    self.document
                        .lock()
                        .actions
                        .push(Action::Dialog(kind, message, response));
                }
                Reaction::Navigate(path) => {
                    let next = self.navigate(&path)?;
                    self.apply(next)?;
                }
                Reaction::Show(key) => self.set_visible(&key, true),
                Reaction::Hide(key) => self.set_visible(&key, false),
                Reaction::Insert(key, element) => {
                    self.document
                        .lock()
                        .elements
                        .entry(key)
                        .or_default()
                        .push(element);
                }
                Reaction::Remove(key, index) => {
                    if let Some(all) = self.document.lock().elements.get_mut(&key) {
                        if index < all.len() {
                            all.remove(index);
                        }
                    }
                }
                Reaction::Clear(key) => {
                    self.document.lock().elements.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn set_visible(&self, key: &str, visible: bool) {
        if let Some(all) = self.document.lock().elements.get_mut(key) {
            for element in all {
                element.visible = visible;
            }
        }
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn goto(&self, path: &str) -> Result<()> {
        tracing::debug!("Scripted goto {}", path);
        let reactions = self.navigate(path)?;
        self.apply(reactions)
    }

    async fn click(&self, target: &Target) -> Result<()> {
        tracing::debug!("Scripted click '{}'", target);
        let reactions = {
            let mut document = self.document.lock();
            document.actions.push(Action::Click(target.to_string()));
            if !document.single(target)?.visible {
                return Err(Error::Timeout {
                    what: format!("'{}' to be visible", target),
                    timeout_ms: 0,
                });
            }
            document.reactions_for_click(target)
        };
        self.apply(reactions)
    }

    async fn fill(&self, target: &Target, value: &str) -> Result<()> {
        tracing::debug!("Scripted fill '{}' = '{}'", target, value);
        let mut document = self.document.lock();
        document
            .actions
            .push(Action::Fill(target.to_string(), value.to_string()));
        document.single_mut(target)?.value = value.to_string();
        Ok(())
    }

    async fn is_visible(&self, target: &Target) -> Result<bool> {
        let document = self.document.lock();
        Ok(document
            .matches(target)
            .first()
            .is_some_and(|element| element.visible))
    }

    async fn count(&self, target: &Target) -> Result<usize> {
        Ok(self.document.lock().matches(target).len())
    }

    async fn text_content(&self, target: &Target) -> Result<Option<String>> {
        Ok(self.document.lock().single(target)?.text.clone())
    }

    async fn get_attribute(&self, target: &Target, name: &str) -> Result<Option<String>> {
        Ok(self
            .document
            .lock()
            .single(target)?
            .attributes
            .get(name)
            .cloned())
    }

    async fn input_value(&self, target: &Target) -> Result<String> {
        Ok(self.document.lock().single(target)?.value.clone())
    }

    fn dialogs(&self) -> &DialogRouter {
        &self.dialogs
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::WaitState;
    use crate::selector::Selector;

    fn session() -> ScriptedSession {
        ScriptedSession::new("https://store.test/").unwrap()
    }

    #[tokio::test]
    async fn test_goto_resolves_against_base_url() {
        let session = session().on_goto(
            "/cart.html",
            Reaction::Insert("#tbodyid".into(), Element::visible()),
        );
        let table = Target::new(Selector::id("tbodyid"));

        session.goto("/cart.html").await.unwrap();

        assert_eq!(
            session.url().unwrap().as_str(),
            "https://store.test/cart.html"
        );
        assert_eq!(
            session.actions(),
            vec![Action::Goto("/cart.html".to_string())]
        );
        assert!(session.is_visible(&table).await.unwrap());
    }

    #[tokio::test]
    async fn test_click_is_strict() {
        let session = session()
            .with_element(".card", Element::visible())
            .with_element(".card", Element::visible());
        let cards = Target::new(Selector::css(".card"));

        let err = session.click(&cards).await.unwrap_err();
        assert!(matches!(err, Error::StrictModeViolation { count: 2, .. }));

        session.click(&cards.clone().first()).await.unwrap();
        assert_eq!(session.count(&cards).await.unwrap(), 2);
        assert_eq!(session.all(&cards).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_click_missing_or_hidden_element() {
        let session = session().with_element("#orderModal", Element::hidden());

        assert!(matches!(
            session.click(&Target::new(Selector::id("login2"))).await,
            Err(Error::ElementNotFound(_))
        ));
        assert!(matches!(
            session.click(&Target::new(Selector::id("orderModal"))).await,
            Err(Error::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_click_fires_reactions() {
        let session = session()
            .with_element("#login2", Element::visible())
            .with_element("#logInModal", Element::hidden())
            .on_click("#login2", Reaction::Show("#logInModal".into()))
            .on_click("#login2", Reaction::Dialog(DialogKind::Alert, "hello".into()));
        let modal = Target::new(Selector::id("logInModal"));

        session.click(&Target::new(Selector::id("login2"))).await.unwrap();

        assert!(session.is_visible(&modal).await.unwrap());
        assert_eq!(session.dialogs().unhandled()[0].message, "hello");
        assert_eq!(
            session.actions().last(),
            Some(&Action::Dialog(DialogKind::Alert, "hello".into(), DialogResponse::Accept))
        );
    }

    #[tokio::test]
    async fn test_indexed_click_uses_unindexed_reactions() {
        let delete = r#"a[onclick*="deleteItem"]"#;
        let session = session()
            .with_element(delete, Element::visible())
            .with_element(delete, Element::visible())
            .on_click(delete, Reaction::Remove(delete.into(), 0));
        let links = Target::new(Selector::attr_contains("a", "onclick", "deleteItem"));

        session.click(&links.clone().nth(1)).await.unwrap();
        assert_eq!(session.count(&links).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fill_and_read_back() {
        let session = session().with_element("#name", Element::visible().with_value("old"));
        let name = Target::new(Selector::id("name"));

        session.fill(&name, "John Doe").await.unwrap();

        assert_eq!(session.input_value(&name).await.unwrap(), "John Doe");
        assert_eq!(
            session.actions(),
            vec![Action::Fill("#name".into(), "John Doe".into())]
        );
    }

    #[tokio::test]
    async fn test_text_and_attributes() {
        let session = session()
            .with_element(".card-title", Element::visible().with_text("Nexus 6"))
            .with_element(".card-title", Element::visible().with_text("Sony xperia z5"))
            .with_element(
                ".card-img-top",
                Element::visible().with_attribute("src", "imgs/nexus_1.jpg"),
            );

        let titles = Target::new(Selector::css(".card-title"));
        assert_eq!(
            session.all_text_contents(&titles).await.unwrap(),
            vec!["Nexus 6", "Sony xperia z5"]
        );

        let image = Target::new(Selector::css(".card-img-top"));
        assert_eq!(
            session.get_attribute(&image, "src").await.unwrap().as_deref(),
            Some("imgs/nexus_1.jpg")
        );
        assert_eq!(session.get_attribute(&image, "alt").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_wait_for_states() {
        let session = session().with_element("#logout2", Element::hidden());
        let logout = Target::new(Selector::id("logout2"));
        let missing = Target::new(Selector::id("cartur"));

        session
            .wait_for(&logout, WaitState::Hidden, Duration::from_millis(10))
            .await
            .unwrap();
        session
            .wait_for(&logout, WaitState::Attached, Duration::from_millis(10))
            .await
            .unwrap();
        session
            .wait_for(&missing, WaitState::Detached, Duration::from_millis(10))
            .await
            .unwrap();

        let err = session
            .wait_for(&logout, WaitState::Visible, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_navigate_reaction() {
        let session = session()
            .with_element("#cartur", Element::visible())
            .on_click("#cartur", Reaction::Navigate("/cart.html".into()))
            .on_goto("/cart.html", Reaction::Clear(".card".into()));

        session.click(&Target::new(Selector::id("cartur"))).await.unwrap();

        assert_eq!(session.url().unwrap().path(), "/cart.html");
        assert_eq!(
            session.actions(),
            vec![
                Action::Click("#cartur".into()),
                Action::Goto("/cart.html".into())
            ]
        );
    }
}
