#![forbid(unsafe_code)]

//! Host-driven page engine.
//!
//! [`Enhancer`] binds the behaviors of `cmui-forms` to a [`Page`] and runs
//! them without threads or blocking. The host controls the loop:
//!
//! 1. Call [`Enhancer::init`] once the document is ready (and again after
//!    adding forms or rows; already-bound elements are skipped).
//! 2. Feed events via [`Enhancer::dispatch`] or [`Enhancer::dispatch_json`].
//! 3. Advance time via [`Enhancer::advance_time`] or [`Enhancer::set_time`];
//!    due tasks run during the call.
//! 4. Apply the intents from [`Enhancer::take_intents`].
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use cmui_core::event::Event;
//! use cmui_core::ids::FormId;
//! use cmui_forms::{Form, ScriptedPrompt};
//! use cmui_validation::Field;
//! use cmui_web::{Enhancer, EnhancerConfig, Page};
//!
//! let page = Page::new().form(
//!     Form::new(FormId(1), "/add_contact")
//!         .field(Field::new("name", "").required())
//!         .with_submit("Add Contact"),
//! );
//! let mut engine = Enhancer::new(page, EnhancerConfig::default(), ScriptedPrompt::default());
//! engine.init();
//! engine.dispatch(Event::Submit { form: FormId(1) }).unwrap();
//! engine.advance_time(Duration::from_secs(6));
//! let intents = engine.take_intents();
//! assert!(!intents.is_empty());
//! ```
//!
//! # Failure Modes
//!
//! | Scenario | Behavior |
//! |----------|----------|
//! | Event before `init` | `EnhanceError::NotInitialized` |
//! | Id not on the page | `UnknownForm` / `UnknownRow` |
//! | Demo or not-yet-bound form/row | Ignored, `Ok(())` |
//! | Task fires after its node was removed | Cancelled on removal; re-checked anyway |

use core::time::Duration;
use std::collections::HashSet;

use tracing::{debug, debug_span, info, info_span, trace};

use cmui_core::clock::{Clock, DeterministicClock};
use cmui_core::event::Event;
use cmui_core::ids::{FormId, NoticeId, RowId};
use cmui_core::intent::Intent;
use cmui_core::scheduler::TaskOwner;
use cmui_core::targets;
use cmui_forms::confirm::{self, ConfirmPrompt, DeleteFlow, DeleteOutcome};
use cmui_forms::counter::render_counter;
use cmui_forms::notice::NoticeCenter;
use cmui_forms::shortcuts::{self, Shortcut};
use cmui_forms::{
    ContactRow, ContactTable, DirtyRegistry, Effects, Form, FormState, SubmitController, Task,
};

use crate::config::EnhancerConfig;
use crate::input::parse_event;
use crate::page::Page;
use crate::{EnhanceError, Result};

/// The page engine.
#[derive(Debug)]
pub struct Enhancer<P: ConfirmPrompt> {
    config: EnhancerConfig,
    clock: DeterministicClock,
    fx: Effects,
    page: Page,
    /// Bound forms, in page order.
    forms: Vec<FormState>,
    rows: HashSet<RowId>,
    dirty: DirtyRegistry,
    notices: NoticeCenter,
    submit: SubmitController,
    deletes: DeleteFlow,
    prompt: P,
    initialized: bool,
}

impl<P: ConfirmPrompt> Enhancer<P> {
    /// Create an engine for `page`. Nothing is bound until [`Self::init`].
    pub fn new(page: Page, config: EnhancerConfig, prompt: P) -> Self {
        Self {
            clock: DeterministicClock::new(),
            fx: Effects::new(),
            page,
            forms: Vec::new(),
            rows: HashSet::new(),
            dirty: DirtyRegistry::new(),
            notices: NoticeCenter::new(config.notice_timings()),
            submit: SubmitController::new(config.submit_settings()),
            deletes: DeleteFlow::new(config.delete_navigate_after),
            prompt,
            initialized: false,
            config,
        }
    }

    // --- Lifecycle ---

    /// Bind every form and row not bound yet. Returns how many were bound.
    ///
    /// Safe to call repeatedly. Flash adoption and autofocus only happen on
    /// the first call.
    pub fn init(&mut self) -> usize {
        let _span = info_span!(target: targets::ENGINE, "init", forms = self.page.forms.len())
            .entered();
        self.fx.set_now(self.clock.now_mono());
        let first = !self.initialized;
        self.initialized = true;

        if self.page.notice_region {
            self.notices.set_region_present(true);
        }

        let mut bound = 0;
        for form in &self.page.forms {
            if form.demo || self.forms.iter().any(|s| s.id() == form.id) {
                continue;
            }
            let tracked = self.dirty.track(form);
            for field in &form.fields {
                render_counter(&mut self.fx, form.id, field);
            }
            debug!(
                target: targets::ENGINE,
                form = %form.id,
                action = %form.action,
                tracked,
                "form bound",
            );
            self.forms.push(FormState::new(form.clone()));
            bound += 1;
        }

        if let Some(table) = &self.page.table {
            for row in table.rows.iter().filter(|r| !r.demo) {
                if self.rows.insert(row.id) {
                    bound += 1;
                }
            }
        }

        if first {
            for flash in &self.page.flashes {
                self.notices.adopt_flash(&mut self.fx, flash.id);
            }
            if shortcuts::autofocus_allowed(self.page.hash.as_deref()) {
                self.fx
                    .schedule(self.config.autofocus_after, TaskOwner::Page, Task::Autofocus);
            }
        }

        info!(target: targets::ENGINE, bound, first, "page enhanced");
        bound
    }

    /// Cancel every task and forget all bindings.
    pub fn teardown(&mut self) {
        self.fx.cancel_all();
        self.notices.clear(&mut self.fx);
        self.forms.clear();
        self.rows.clear();
        self.dirty = DirtyRegistry::new();
        self.deletes = DeleteFlow::new(self.config.delete_navigate_after);
        self.initialized = false;
        debug!(target: targets::ENGINE, "page engine torn down");
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // --- Events ---

    /// Decode a JSON host event and dispatch it.
    pub fn dispatch_json(&mut self, json: &str) -> Result<()> {
        let event = parse_event(json)?;
        self.dispatch(event)
    }

    /// Handle one page event.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        if !self.initialized {
            return Err(EnhanceError::NotInitialized);
        }
        let _span =
            debug_span!(target: targets::ENGINE, "dispatch", kind = event.kind()).entered();
        self.fx.set_now(self.clock.now_mono());

        match event {
            Event::Blur { form, field } => {
                let Some(i) = self.bound_form(form)? else {
                    return Ok(());
                };
                if self.forms[i].validate_field(&mut self.fx, &field).is_none() {
                    return Err(EnhanceError::UnknownField { form, field });
                }
            }
            Event::Input { form, field, value } => {
                let Some(i) = self.bound_form(form)? else {
                    return Ok(());
                };
                let state = &mut self.forms[i];
                if !state.set_value(&field, &value) {
                    return Err(EnhanceError::UnknownField { form, field });
                }
                state.clear_field(&mut self.fx, &field);
                if let Some(f) = state.field(&field) {
                    render_counter(&mut self.fx, form, f);
                }
                let values = state.fields().map(|f| (f.name.as_str(), f.value.as_str()));
                self.dirty.on_input(&mut self.fx, form, values);
            }
            Event::Submit { form } => {
                let Some(i) = self.bound_form(form)? else {
                    return Ok(());
                };
                self.dirty.on_submit(form);
                self.submit
                    .on_submit(&mut self.fx, &mut self.notices, &mut self.forms[i]);
            }
            Event::Reset { form } => {
                let Some(i) = self.bound_form(form)? else {
                    return Ok(());
                };
                confirm::confirm_reset(&mut self.fx, &mut self.prompt, &mut self.forms[i]);
            }
            Event::DeleteClick { row } => self.on_delete_click(row)?,
            Event::HeaderClick { column } => match self.page.table.as_mut() {
                Some(table) => {
                    if !table.sort_by(&mut self.fx, column, self.config.header_highlight) {
                        debug!(target: targets::ENGINE, column, "header not sortable");
                    }
                }
                None => debug!(
                    target: targets::ENGINE,
                    column,
                    "header click without a contacts table",
                ),
            },
            Event::DismissNotice { notice } => {
                if !self.notices.dismiss(&mut self.fx, notice) {
                    debug!(target: targets::ENGINE, %notice, "dismiss ignored, notice not visible");
                }
            }
            Event::Key(key) => {
                if let Some(shortcut) = Shortcut::from_key(&key) {
                    let target = match shortcut {
                        Shortcut::NewContact => shortcuts::add_form(&self.forms),
                        Shortcut::ReleaseFocus => None,
                    };
                    for intent in shortcuts::shortcut_intents(shortcut, target) {
                        self.fx.emit(intent);
                    }
                }
            }
            Event::BeforeUnload => {
                if self.dirty.before_unload(&mut self.fx) {
                    info!(target: targets::ENGINE, "unload guarded, unsaved changes");
                }
            }
        }
        Ok(())
    }

    fn on_delete_click(&mut self, row: RowId) -> Result<()> {
        let contact = self
            .page
            .table
            .as_ref()
            .and_then(|t| t.row(row))
            .ok_or(EnhanceError::UnknownRow(row))?;
        if !self.rows.contains(&row) {
            debug!(target: targets::ENGINE, %row, "delete click on unbound row");
            return Ok(());
        }
        let outcome = self
            .deletes
            .on_click(&mut self.fx, &mut self.prompt, contact);
        if outcome == DeleteOutcome::Busy {
            debug!(target: targets::ENGINE, %row, "delete already in flight");
        }
        Ok(())
    }

    /// Index of the bound form, `None` for demo or unbound forms on the page.
    fn bound_form(&self, id: FormId) -> Result<Option<usize>> {
        if let Some(i) = self.forms.iter().position(|s| s.id() == id) {
            return Ok(Some(i));
        }
        if self.page.has_form(id) {
            debug!(target: targets::ENGINE, form = %id, "event for unbound form ignored");
            Ok(None)
        } else {
            Err(EnhanceError::UnknownForm(id))
        }
    }

    // --- Time ---

    /// Advance the clock by `dt` and run every task that became due.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
        self.run_due();
    }

    /// Move the clock to `now` (never backwards) and run due tasks.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
        self.run_due();
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now_mono()
    }

    /// When the host should next call back, if anything is pending.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.fx.next_due()
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.fx.pending_tasks()
    }

    fn run_due(&mut self) {
        let now = self.clock.now_mono();
        while let Some(due) = self.fx.pop_due(now) {
            trace!(target: targets::ENGINE, task = due.task.kind(), id = %due.id, "task due");
            match due.task {
                Task::RestoreSubmit { form } => {
                    if let Some(state) = self.forms.iter_mut().find(|s| s.id() == form) {
                        self.submit
                            .on_restore_due(&mut self.fx, &mut self.notices, state);
                    }
                }
                Task::FadeNotice { notice } => self.notices.on_fade_due(&mut self.fx, notice),
                Task::RemoveNotice { notice } => self.notices.on_remove_due(&mut self.fx, notice),
                Task::NavigateDelete { row, url } => {
                    if self.rows.contains(&row) {
                        self.deletes.on_navigate_due(&mut self.fx, row, url);
                    }
                }
                Task::ClearHeaderHighlight { column } => {
                    if self.page.table.is_some() {
                        self.fx.emit(Intent::ClearHeaderHighlight { column });
                    }
                }
                Task::Autofocus => match shortcuts::first_editable(&self.forms) {
                    Some((form, field)) => self.fx.emit(Intent::FocusField { form, field }),
                    None => debug!(target: targets::ENGINE, "autofocus found no editable field"),
                },
            }
        }
        self.fx.set_now(now);
    }

    // --- Output ---

    /// Take every intent produced so far, oldest first.
    pub fn take_intents(&mut self) -> Vec<Intent> {
        self.fx.drain_intents()
    }

    /// Take every intent as a JSON array.
    pub fn take_intents_json(&mut self) -> Result<String> {
        let intents = self.fx.drain_intents();
        Ok(serde_json::to_string(&intents)?)
    }

    // --- Page mutation ---

    /// Put a new form on the page. It is bound on the next [`Self::init`].
    pub fn add_form(&mut self, form: Form) -> Result<()> {
        if self.page.has_form(form.id) {
            return Err(EnhanceError::DuplicateId("form", form.id.0));
        }
        self.page.forms.push(form);
        Ok(())
    }

    /// Remove a form, dropping its snapshot and pending tasks.
    pub fn remove_form(&mut self, id: FormId) -> Result<Form> {
        let pos = self
            .page
            .forms
            .iter()
            .position(|f| f.id == id)
            .ok_or(EnhanceError::UnknownForm(id))?;
        let form = self.page.forms.remove(pos);
        self.forms.retain(|s| s.id() != id);
        self.dirty.release(id);
        self.fx.cancel_owner(TaskOwner::Form(id));
        debug!(target: targets::ENGINE, form = %id, "form removed");
        Ok(form)
    }

    /// Append a row to the contacts table. It is bound on the next [`Self::init`].
    pub fn add_row(&mut self, row: ContactRow) -> Result<()> {
        let table = self.page.table.get_or_insert_with(ContactTable::default);
        if table.row(row.id).is_some() {
            return Err(EnhanceError::DuplicateId("row", row.id.0));
        }
        table.rows.push(row);
        Ok(())
    }

    /// Remove a row, cancelling any pending delete navigation.
    pub fn remove_row(&mut self, id: RowId) -> Result<ContactRow> {
        let table = self.page.table.as_mut().ok_or(EnhanceError::UnknownRow(id))?;
        let pos = table
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(EnhanceError::UnknownRow(id))?;
        let row = table.rows.remove(pos);
        self.rows.remove(&id);
        self.deletes.forget(&mut self.fx, id);
        debug!(target: targets::ENGINE, row = %id, "row removed");
        Ok(row)
    }

    /// Drop a notice from the page before its timers fire.
    pub fn remove_notice(&mut self, id: NoticeId) {
        self.fx.cancel_owner(TaskOwner::Notice(id));
        self.notices.on_remove_due(&mut self.fx, id);
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Live state of a bound form.
    #[must_use]
    pub fn form_state(&self, id: FormId) -> Option<&FormState> {
        self.forms.iter().find(|s| s.id() == id)
    }

    #[must_use]
    pub fn is_row_bound(&self, id: RowId) -> bool {
        self.rows.contains(&id)
    }

    #[must_use]
    pub fn dirty(&self) -> &DirtyRegistry {
        &self.dirty
    }

    #[must_use]
    pub fn notices(&self) -> &NoticeCenter {
        &self.notices
    }

    #[must_use]
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }
}
