//! In-memory portal used to drive the pipeline in tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{PortalSettings, selectors};
use crate::browser::{Automation, BrowserError, BrowsingContext, Frame, Result};
use crate::model::report_filter::{Session, Year};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Goto(String),
    Click(Frame, String),
    Type(Frame, String, String),
}

pub fn test_settings() -> PortalSettings {
    PortalSettings {
        url: "https://portal.test/irj/portal/".to_string(),
        selector_timeout: Duration::from_millis(20),
        rows_timeout: Duration::from_millis(20),
    }
}

pub fn shell() -> Frame {
    Frame::top().child(selectors::SHELL_FRAME)
}

pub fn work_area() -> Frame {
    shell().child(selectors::WORK_AREA_FRAME)
}

pub fn standard_header() -> Vec<String> {
    [
        "",
        "Subject",
        "No.of Present",
        "No.of Absent",
        "No. of Excuses",
        "Total No. of Days",
        "Total Percentage",
        "Faculty Name",
        "Faculty Name",
        "Total Percentage with Excuses",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// A static DOM: what exists, what it reads as, which elements are frames.
#[derive(Debug, Clone, Default)]
pub struct FakePortal {
    texts: HashMap<(Frame, String), String>,
    attributes: HashMap<(Frame, String, String), String>,
    frames: HashSet<(Frame, String)>,
    rows: HashMap<(Frame, String), Vec<Vec<String>>>,
}

impl FakePortal {
    /// Only the login form.
    pub fn login_page() -> Self {
        let top = Frame::top();
        Self::default()
            .with_text(&top, selectors::LOGIN_USERNAME, "")
            .with_text(&top, selectors::LOGIN_PASSWORD, "")
            .with_text(&top, selectors::LOGIN_SUBMIT, "")
    }

    /// Everything up to the report form, with an empty attendance table.
    pub fn logged_in() -> Self {
        let top = Frame::top();
        let work = work_area();
        let mut portal = Self::login_page()
            .with_frame(&top, selectors::SHELL_FRAME)
            .with_text(
                &shell(),
                &selectors::nav_link(selectors::ATTENDANCE_LINK_TITLE),
                "Student Attendance Details",
            )
            .with_frame(&shell(), selectors::WORK_AREA_FRAME)
            .with_text(&work, selectors::STUDENT_NAME, "ANANYA ROY")
            .with_text(&work, selectors::STUDENT_SCHOOL, "School of Computer Engineering")
            .with_text(&work, selectors::STUDENT_PROGRAM, "B.Tech")
            .with_text(&work, selectors::STUDENT_SEMESTER, "5")
            .with_text(&work, selectors::STUDENT_ROLL, "2105123")
            .with_text(&work, selectors::STUDENT_REGISTRATION, "21051230001")
            .with_text(&work, selectors::STUDENT_PHOTO, "")
            .with_attribute(&work, selectors::STUDENT_PHOTO, "src", "/photo/2105123.jpg")
            .with_text(&work, selectors::YEAR_DROPDOWN, "")
            .with_text(&work, selectors::SESSION_DROPDOWN, "")
            .with_text(&work, selectors::REPORT_SUBMIT, "Submit");
        for year in Year::iter() {
            portal = portal.with_text(&work, year.selector_token(), year.label());
        }
        for session in Session::iter() {
            portal = portal.with_text(&work, session.selector_token(), session.as_ref());
        }
        portal
    }

    pub fn with_text(mut self, frame: &Frame, selector: &str, text: &str) -> Self {
        self.texts
            .insert((frame.clone(), selector.to_string()), text.to_string());
        self
    }

    pub fn with_attribute(mut self, frame: &Frame, selector: &str, name: &str, value: &str) -> Self {
        self.attributes.insert(
            (frame.clone(), selector.to_string(), name.to_string()),
            value.to_string(),
        );
        self
    }

    pub fn with_frame(mut self, frame: &Frame, selector: &str) -> Self {
        self.frames.insert((frame.clone(), selector.to_string()));
        self
    }

    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.rows
            .insert((work_area(), selectors::HEADER_ROW.to_string()), vec![header]);
        self
    }

    pub fn with_rows(mut self, rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        self.rows
            .insert((work_area(), selectors::DATA_ROWS.to_string()), rows);
        self
    }

    pub fn without(mut self, frame: &Frame, selector: &str) -> Self {
        let key = (frame.clone(), selector.to_string());
        self.texts.remove(&key);
        self.frames.remove(&key);
        self.rows.remove(&key);
        self.attributes
            .retain(|(f, s, _), _| !(f == frame && s == selector));
        self
    }

    pub fn without_attendance_link(self) -> Self {
        self.without(&shell(), &selectors::nav_link(selectors::ATTENDANCE_LINK_TITLE))
    }

    pub fn without_work_area(self) -> Self {
        self.without(&shell(), selectors::WORK_AREA_FRAME)
    }

    fn exists(&self, frame: &Frame, selector: &str) -> bool {
        let key = (frame.clone(), selector.to_string());
        self.texts.contains_key(&key)
            || self.frames.contains(&key)
            || self.rows.get(&key).is_some_and(|rows| !rows.is_empty())
            || self
                .attributes
                .keys()
                .any(|(f, s, _)| f == frame && s == selector)
    }
}

#[derive(Default)]
struct FakeState {
    actions: Mutex<Vec<Action>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    reads: AtomicUsize,
}

pub struct FakeAutomation {
    portal: Arc<FakePortal>,
    state: Arc<FakeState>,
}

impl FakeAutomation {
    pub fn new(portal: FakePortal) -> Self {
        Self {
            portal: Arc::new(portal),
            state: Arc::default(),
        }
    }

    pub fn context(&self) -> Box<dyn BrowsingContext> {
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeContext {
            portal: Arc::clone(&self.portal),
            state: Arc::clone(&self.state),
        })
    }

    pub fn actions(&self) -> Vec<Action> {
        self.state.actions.lock().unwrap().clone()
    }

    pub fn contexts_opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    pub fn contexts_closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.state.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Automation for FakeAutomation {
    async fn new_context(&self) -> Result<Box<dyn BrowsingContext>> {
        Ok(self.context())
    }
}

struct FakeContext {
    portal: Arc<FakePortal>,
    state: Arc<FakeState>,
}

impl FakeContext {
    fn record(&self, action: Action) {
        self.state.actions.lock().unwrap().push(action);
    }

    fn ensure(&self, frame: &Frame, selector: &str) -> Result<()> {
        if self.portal.exists(frame, selector) {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
            })
        }
    }
}

#[async_trait]
impl BrowsingContext for FakeContext {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(Action::Goto(url.to_string()));
        Ok(())
    }

    async fn exists(&self, frame: &Frame, selector: &str) -> Result<bool> {
        Ok(self.portal.exists(frame, selector))
    }

    async fn text(&self, frame: &Frame, selector: &str) -> Result<Option<String>> {
        self.state.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .portal
            .texts
            .get(&(frame.clone(), selector.to_string()))
            .cloned())
    }

    async fn attribute(
        &self,
        frame: &Frame,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>> {
        self.state.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .portal
            .attributes
            .get(&(frame.clone(), selector.to_string(), name.to_string()))
            .cloned())
    }

    async fn click(&self, frame: &Frame, selector: &str) -> Result<()> {
        self.ensure(frame, selector)?;
        self.record(Action::Click(frame.clone(), selector.to_string()));
        Ok(())
    }

    async fn type_text(&self, frame: &Frame, selector: &str, text: &str) -> Result<()> {
        self.ensure(frame, selector)?;
        self.record(Action::Type(
            frame.clone(),
            selector.to_string(),
            text.to_string(),
        ));
        Ok(())
    }

    async fn content_frame(&self, frame: &Frame, selector: &str) -> Result<Frame> {
        if self
            .portal
            .frames
            .contains(&(frame.clone(), selector.to_string()))
        {
            Ok(frame.child(selector))
        } else {
            Err(BrowserError::NotAFrame {
                selector: selector.to_string(),
            })
        }
    }

    async fn row_cells(&self, frame: &Frame, row_selector: &str) -> Result<Vec<Vec<String>>> {
        self.state.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .portal
            .rows
            .get(&(frame.clone(), row_selector.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
