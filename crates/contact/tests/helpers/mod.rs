#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use prestigia_contact::{ApiReply, ContactApi, ContactForm, TransportError};
use tokio::sync::Notify;

pub enum Reply {
    Ok,
    Rejected(&'static str),
    Unreachable,
}

/// Contact endpoint double recording every form it receives.
#[derive(Default)]
pub struct FakeApi {
    replies: Mutex<VecDeque<Reply>>,
    sent: Mutex<Vec<ContactForm>>,
    gate: Option<Gate>,
}

struct Gate {
    started: Notify,
    release: Notify,
}

impl FakeApi {
    pub fn replying(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        })
    }

    /// Like [`FakeApi::replying`] but every request waits for
    /// [`FakeApi::release`] before answering.
    pub fn gated(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            gate: Some(Gate {
                started: Notify::new(),
                release: Notify::new(),
            }),
            ..Default::default()
        })
    }

    pub async fn started(&self) {
        if let Some(gate) = &self.gate {
            gate.started.notified().await;
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.release.notify_one();
        }
    }

    pub fn sent(&self) -> Vec<ContactForm> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactApi for FakeApi {
    async fn send(&self, form: &ContactForm) -> Result<ApiReply, TransportError> {
        self.sent.lock().unwrap().push(form.clone());

        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Reply::Ok);

        match reply {
            Reply::Ok => Ok(ApiReply {
                ok: true,
                error: None,
            }),
            Reply::Rejected(error) => Ok(ApiReply {
                ok: false,
                error: Some(error.to_owned()),
            }),
            Reply::Unreachable => {
                Err(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err().into())
            }
        }
    }
}

pub fn contact_form() -> ContactForm {
    ContactForm::new(
        "Yassine",
        "yassine@example.com",
        Some("+212 600 000 000".to_owned()),
        "Site vitrine",
        "Bonjour, je souhaite un devis.",
    )
}
