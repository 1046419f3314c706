//! Test utilities: a scripted in-memory search page implementing `PageDriver`

use futures::channel::oneshot;
use search_probe::driver::scripts;
use search_probe::{NavigationWait, PageDriver, ProbeError, ProbeResult, Selectors};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Content of a results page served for one query
#[derive(Debug, Clone, Default)]
pub struct ResultsPage {
    pub result_nodes: usize,
    pub links: Vec<String>,
    pub calculator: Option<String>,
}

impl ResultsPage {
    /// A page whose result blocks each carry one of `links`
    #[allow(dead_code)]
    pub fn with_links<S: AsRef<str>>(links: &[S]) -> Self {
        Self {
            result_nodes: links.len(),
            links: links.iter().map(|l| l.as_ref().to_string()).collect(),
            calculator: None,
        }
    }

    #[allow(dead_code)]
    pub fn calculator(text: &str) -> Self {
        Self {
            result_nodes: 0,
            links: Vec::new(),
            calculator: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct PageState {
    url: String,
    has_input: bool,
    has_form: bool,
    input_value: String,
    current: ResultsPage,
    watchers: Vec<oneshot::Sender<()>>,
    log: Vec<String>,
}

/// In-memory stand-in for the search page
///
/// Submitting the form loads the `ResultsPage` registered for the typed
/// query (or an empty page). Only watchers registered before the submit see
/// the navigation; a watcher registered afterwards times out, like a real
/// browser that finished loading before anyone listened.
#[derive(Debug)]
pub struct ScriptedPage {
    selectors: Selectors,
    responses: HashMap<String, ResultsPage>,
    navigation_timeout: Duration,
    navigates: bool,
    state: Mutex<PageState>,
}

#[allow(dead_code)]
impl ScriptedPage {
    pub fn new() -> Self {
        Self {
            selectors: Selectors::google(),
            responses: HashMap::new(),
            navigation_timeout: Duration::from_millis(200),
            navigates: true,
            state: Mutex::new(PageState {
                url: "https://google.com/".to_string(),
                has_input: true,
                has_form: true,
                ..PageState::default()
            }),
        }
    }

    pub fn respond(mut self, query: &str, page: ResultsPage) -> Self {
        self.responses.insert(query.to_string(), page);
        self
    }

    /// Input and form absent, as after a markup change
    pub fn without_search_form(self) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.has_input = false;
            state.has_form = false;
        }
        self
    }

    pub fn without_form(self) -> Self {
        self.state.lock().unwrap().has_form = false;
        self
    }

    /// Submitting the form does nothing
    pub fn never_navigates(mut self) -> Self {
        self.navigates = false;
        self
    }

    pub fn prefill_input(self, value: &str) -> Self {
        self.state.lock().unwrap().input_value = value.to_string();
        self
    }

    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Every driver call so far, in order
    pub fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn input_value(&self) -> String {
        self.state.lock().unwrap().input_value.clone()
    }

    pub fn url(&self) -> String {
        self.state.lock().unwrap().url.clone()
    }

    fn submit(&self) -> ProbeResult<Value> {
        let mut state = self.state.lock().unwrap();
        if !state.has_form {
            return Err(ProbeError::not_found(&self.selectors.query_form));
        }
        state.log.push("submit".to_string());
        if !self.navigates {
            return Ok(Value::Null);
        }

        let query = state.input_value.clone();
        state.current = self.responses.get(&query).cloned().unwrap_or_default();
        state.url = format!("https://google.com/search?q={}", query.replace(' ', "+"));
        state.log.push("navigated".to_string());
        for watcher in state.watchers.drain(..) {
            let _ = watcher.send(());
        }
        Ok(Value::Null)
    }
}

impl PageDriver for ScriptedPage {
    async fn goto(&self, url: &str) -> ProbeResult<()> {
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("goto {url}"));
        state.url = url.to_string();
        Ok(())
    }

    async fn set_property(&self, selector: &str, property: &str, value: Value) -> ProbeResult<()> {
        let mut state = self.state.lock().unwrap();
        if selector != self.selectors.query_input || !state.has_input {
            return Err(ProbeError::not_found(selector));
        }
        state.log.push(format!("set {property}={value}"));
        if property == "value" {
            state.input_value = value.as_str().unwrap_or_default().to_string();
        }
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> ProbeResult<()> {
        let mut state = self.state.lock().unwrap();
        if selector != self.selectors.query_input || !state.has_input {
            return Err(ProbeError::not_found(selector));
        }
        state.log.push(format!("type {text}"));
        // Typing appends to whatever is already in the box
        state.input_value.push_str(text);
        Ok(())
    }

    async fn eval_on_selector(&self, selector: &str, function: &str) -> ProbeResult<Value> {
        if selector == self.selectors.query_form && function == scripts::SUBMIT_FORM {
            return self.submit();
        }

        let state = self.state.lock().unwrap();
        if selector == self.selectors.calculator && function == scripts::TEXT_CONTENT {
            return match &state.current.calculator {
                Some(text) => Ok(Value::String(text.clone())),
                None => Err(ProbeError::not_found(selector)),
            };
        }
        Err(ProbeError::not_found(selector))
    }

    async fn eval_on_selector_all(&self, selector: &str, function: &str) -> ProbeResult<Value> {
        let state = self.state.lock().unwrap();
        if selector == self.selectors.result && function == scripts::COUNT_NODES {
            return Ok(Value::from(state.current.result_nodes));
        }
        if selector == self.selectors.result_link && function == scripts::ANCHOR_HREFS {
            return Ok(Value::from(state.current.links.clone()));
        }
        // Unknown selector: behaves like querySelectorAll matching nothing
        if function == scripts::COUNT_NODES {
            Ok(Value::from(0))
        } else {
            Ok(Value::Array(Vec::new()))
        }
    }

    async fn wait_for_navigation(&self) -> ProbeResult<NavigationWait<'_>> {
        let (tx, rx) = oneshot::channel();
        {
            let mut state = self.state.lock().unwrap();
            state.log.push("watch".to_string());
            state.watchers.push(tx);
        }
        let timeout = self.navigation_timeout;
        Ok(Box::pin(async move {
            match tokio::time::timeout(timeout, rx).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(_)) => Err(ProbeError::Closed("page dropped".to_string())),
                Err(_) => Err(ProbeError::NavigationTimeout { timeout }),
            }
        }))
    }
}
