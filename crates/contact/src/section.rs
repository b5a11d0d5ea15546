use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, Weak,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;
use validator::Validate;

use crate::{
    Affordance, ContactApi, ContactForm, Error, FailureReason, Navigation, Result, StatusMessage,
    Submission,
};

/// How long a success message stays on screen.
pub const DEFAULT_CLEAR_AFTER: Duration = Duration::from_secs(3);

#[derive(Default)]
struct Inner {
    submission: Submission,
    draft: ContactForm,
    generation: u64,
    clear_task: Option<JoinHandle<()>>,
}

impl Inner {
    fn cancel_clear(&mut self) {
        if let Some(task) = self.clear_task.take() {
            task.abort();
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The contact section of the site: affordances plus the contact form.
///
/// Only one submission can be in flight at a time; a second call to
/// [`ContactSection::submit`] while the first is pending is rejected with
/// [`Error::Busy`] and never reaches the endpoint. Dropping the section
/// cancels a pending status clear.
pub struct ContactSection<A> {
    api: A,
    clear_after: Duration,
    in_flight: AtomicBool,
    inner: Arc<Mutex<Inner>>,
}

/// Releases the in-flight flag, even when the submit future is dropped
/// while waiting for the endpoint.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    inner: &'a Mutex<Inner>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut inner = lock(self.inner);
        if inner.submission.is_loading() {
            inner.submission = Submission::Idle;
        }
        drop(inner);

        self.flag.store(false, Ordering::Release);
    }
}

impl<A: ContactApi> ContactSection<A> {
    pub fn new(api: A) -> Self {
        Self::with_clear_after(api, DEFAULT_CLEAR_AFTER)
    }

    pub fn with_clear_after(api: A, clear_after: Duration) -> Self {
        Self {
            api,
            clear_after,
            in_flight: AtomicBool::new(false),
            inner: Arc::default(),
        }
    }

    pub fn activate(&self, affordance: Affordance) -> Navigation {
        tracing::debug!(affordance = %affordance, "contact affordance activated");

        affordance.navigate()
    }

    pub fn view(&self) -> SectionView {
        let inner = lock(&self.inner);

        SectionView {
            submission: inner.submission.clone(),
            draft: inner.draft.clone(),
        }
    }

    pub async fn submit(&self, form: ContactForm) -> Result<Submission> {
        form.validate()?;

        let _in_flight = self.begin()?;

        {
            let mut inner = lock(&self.inner);
            inner.cancel_clear();
            inner.generation += 1;
            inner.submission = Submission::Submitting;
            inner.draft = form.clone();
        }

        let outcome = match self.api.send(&form).await {
            Ok(reply) if reply.ok => Submission::Succeeded,
            Ok(reply) => {
                tracing::warn!(error = ?reply.error, "contact form rejected");

                Submission::Failed(FailureReason::Rejected(reply.error.unwrap_or_default()))
            }
            Err(err) => {
                tracing::error!(err = %err, "failed to send contact form");

                Submission::Failed(FailureReason::Unreachable)
            }
        };

        let mut inner = lock(&self.inner);
        inner.submission = outcome.clone();

        if outcome == Submission::Succeeded {
            inner.draft = ContactForm::default();
            inner.clear_task = Some(self.schedule_clear(inner.generation));
        }

        Ok(outcome)
    }

    fn begin(&self) -> Result<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::Busy)?;

        Ok(InFlight {
            flag: &self.in_flight,
            inner: &self.inner,
        })
    }

    fn schedule_clear(&self, generation: u64) -> JoinHandle<()> {
        let inner: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        let delay = self.clear_after;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(inner) = inner.upgrade() else {
                return;
            };

            let mut inner = lock(&inner);
            if inner.generation == generation && inner.submission == Submission::Succeeded {
                inner.submission = Submission::Idle;
                inner.clear_task = None;
            }
        })
    }
}

impl<A> Drop for ContactSection<A> {
    fn drop(&mut self) {
        lock(&self.inner).cancel_clear();
    }
}

/// Snapshot of what the section shows. The default is an idle, empty form.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct SectionView {
    pub submission: Submission,
    pub draft: ContactForm,
}

impl SectionView {
    pub fn loading(&self) -> bool {
        self.submission.is_loading()
    }

    pub fn submit_disabled(&self) -> bool {
        self.loading()
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.submission.status()
    }

    pub fn submit_label(&self, locale: &str) -> String {
        let key = if self.loading() {
            "contact.submit.pending"
        } else {
            "contact.submit.idle"
        };

        rust_i18n::t!(key, locale = locale).to_string()
    }
}
