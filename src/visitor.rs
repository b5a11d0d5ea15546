//! One contact section per visitor, keyed by a cookie.

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use prestigia_contact::{ContactApi, ContactSection};
use tokio::time::Instant;
use ulid::Ulid;

pub const VISITOR_COOKIE: &str = "prestigia_visitor";

pub type Section = ContactSection<Arc<dyn ContactApi>>;

/// The visitor id carried by the request, if any.
pub fn current(jar: &CookieJar) -> Option<String> {
    jar.get(VISITOR_COOKIE)
        .and_then(|cookie| Ulid::from_str(cookie.value()).ok())
        .map(|id| id.to_string())
}

/// Reads the visitor id from the cookie jar, or issues a new one.
pub fn identify(jar: CookieJar) -> (CookieJar, String) {
    if let Some(id) = current(&jar) {
        return (jar, id);
    }

    let id = Ulid::new().to_string();
    let cookie = Cookie::build((VISITOR_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), id)
}

struct Entry {
    section: Arc<Section>,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SectionRegistry {
    api: Arc<dyn ContactApi>,
    clear_after: Duration,
    ttl: Duration,
    sections: Arc<Mutex<HashMap<String, Entry>>>,
}

impl SectionRegistry {
    pub fn new(api: Arc<dyn ContactApi>, clear_after: Duration, ttl: Duration) -> Self {
        Self {
            api,
            clear_after,
            ttl,
            sections: Arc::default(),
        }
    }

    /// The visitor's section, if one was created by a submission.
    pub fn get(&self, visitor: &str) -> Option<Arc<Section>> {
        let mut sections = self.sections.lock().unwrap_or_else(PoisonError::into_inner);

        sections.get_mut(visitor).map(|entry| {
            entry.last_seen = Instant::now();
            entry.section.clone()
        })
    }

    pub fn get_or_create(&self, visitor: &str) -> Arc<Section> {
        let now = Instant::now();
        let mut sections = self.sections.lock().unwrap_or_else(PoisonError::into_inner);

        let entry = sections.entry(visitor.to_owned()).or_insert_with(|| {
            tracing::debug!(visitor, "contact section created");

            Entry {
                section: Arc::new(ContactSection::with_clear_after(
                    self.api.clone(),
                    self.clear_after,
                )),
                last_seen: now,
            }
        });
        entry.last_seen = now;

        entry.section.clone()
    }

    /// Drops the sections of visitors not seen for longer than the ttl,
    /// cancelling their pending status clear.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sections = self.sections.lock().unwrap_or_else(PoisonError::into_inner);

        let before = sections.len();
        sections.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
        let evicted = before - sections.len();

        if evicted > 0 {
            tracing::debug!(evicted, remaining = sections.len(), "idle contact sections evicted");
        }

        evicted
    }

    pub fn len(&self) -> usize {
        self.sections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
