//! Recording mocks for [`Bot`], [`MembershipOracle`] and [`LlmClient`], plus event builders.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::Utc;
use gatebot::config::{BaseConfig, BotConfig, GateConfig, DEFAULT_HEALTH_PORT};
use gatebot::{build_dispatcher, GateDispatcher};
use gatebot_core::{
    Bot, CallbackAction, ChannelRef, Chat, Event, GatebotError, InlineKeyboard, MembershipError,
    MembershipOracle, MembershipStatus, Message, MessageRef, Result, User,
};
use llm_client::LlmClient;
use tracing_subscriber::{fmt, EnvFilter};

pub const USER_ID: i64 = 1001;
pub const CHANNEL: i64 = -1001234567890;
pub const INVITE_LINK: &str = "https://t.me/+invite";
pub const WALL_MESSAGE_ID: &str = "77";

static TRACING_INIT: Once = Once::new();

/// Test-writer tracing so `RUST_LOG=debug cargo test` shows the bot's logs.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = fmt().with_env_filter(env_filter).with_test_writer().try_init();
    });
}

/// One outbound call, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    SendMessage { chat_id: i64, text: String },
    ReplyTo { chat_id: i64, text: String },
    SendHtml {
        chat_id: i64,
        html: String,
        keyboard: Option<InlineKeyboard>,
    },
    EditMessage {
        chat_id: i64,
        message_id: String,
        html: String,
    },
    AnswerCallback {
        callback_id: String,
        text: String,
        show_alert: bool,
    },
    Typing { chat_id: i64 },
}

/// Records every call. `fail_answers_after` makes answer_callback fail once that many answers were given.
#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<BotCall>>,
    fail_answers_after: Option<usize>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_answers_after(n: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_answers_after: Some(n),
        }
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the typing indicator.
    pub fn visible_calls(&self) -> Vec<BotCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, BotCall::Typing { .. }))
            .collect()
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(BotCall::SendMessage {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(BotCall::ReplyTo {
            chat_id: message.chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_html(
        &self,
        chat: &Chat,
        html: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        self.record(BotCall::SendHtml {
            chat_id: chat.id,
            html: html.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn edit_message_html(&self, target: &MessageRef, html: &str) -> Result<()> {
        self.record(BotCall::EditMessage {
            chat_id: target.chat.id,
            message_id: target.message_id.clone(),
            html: html.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str, show_alert: bool) -> Result<()> {
        let answered = self
            .calls()
            .iter()
            .filter(|c| matches!(c, BotCall::AnswerCallback { .. }))
            .count();
        if self.fail_answers_after.is_some_and(|n| answered >= n) {
            return Err(GatebotError::Bot("query is too old".to_string()));
        }
        self.record(BotCall::AnswerCallback {
            callback_id: callback_id.to_string(),
            text: text.to_string(),
            show_alert,
        });
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.record(BotCall::Typing { chat_id: chat.id });
        Ok(())
    }
}

/// Returns the same scripted answer for every lookup and counts calls.
pub struct MockOracle {
    answer: std::result::Result<MembershipStatus, MembershipError>,
    calls: AtomicUsize,
}

impl MockOracle {
    pub fn status(status: MembershipStatus) -> Self {
        Self {
            answer: Ok(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn error(err: MembershipError) -> Self {
        Self {
            answer: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MembershipOracle for MockOracle {
    async fn check_membership(
        &self,
        _user_id: i64,
        _channel: &ChannelRef,
    ) -> std::result::Result<MembershipStatus, MembershipError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

/// Scripted LLM: `Ok(text)` or an error message, plus the prompts it received.
pub struct MockLlm {
    answer: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            answer: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: &str) -> Self {
        Self {
            answer: Err(err.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn get_llm_response(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.answer {
            Ok(ref text) => Ok(text.clone()),
            Err(ref e) => Err(anyhow::anyhow!("{}", e)),
        }
    }
}

/// Config built in code, no env access. `channel: None` means bypass mode.
pub fn test_config(channel: Option<ChannelRef>) -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "123456:TEST".to_string(),
            telegram_api_url: None,
            log_file: None,
            health_port: DEFAULT_HEALTH_PORT,
        },
        gate: GateConfig {
            channel,
            invite_link: Some(INVITE_LINK.to_string()),
        },
        llm: None,
    }
}

pub struct Harness {
    pub bot: Arc<MockBot>,
    pub oracle: Arc<MockOracle>,
    pub llm: Option<Arc<MockLlm>>,
    pub dispatcher: GateDispatcher,
}

/// Dispatcher gating on [`CHANNEL`] with the given mocks.
pub fn harness(oracle: MockOracle, llm: Option<MockLlm>) -> Harness {
    harness_with(test_config(Some(ChannelRef::Id(CHANNEL))), MockBot::new(), oracle, llm)
}

pub fn harness_with(
    config: BotConfig,
    bot: MockBot,
    oracle: MockOracle,
    llm: Option<MockLlm>,
) -> Harness {
    init_tracing();
    let bot = Arc::new(bot);
    let oracle = Arc::new(oracle);
    let llm = llm.map(Arc::new);
    let dispatcher = build_dispatcher(
        &config,
        bot.clone(),
        oracle.clone(),
        llm.clone().map(|l| l as Arc<dyn LlmClient>),
        Some("gate_bot".to_string()),
    );
    Harness {
        bot,
        oracle,
        llm,
        dispatcher,
    }
}

pub fn user() -> User {
    User {
        id: USER_ID,
        username: Some("alice".to_string()),
        first_name: Some("Alice".to_string()),
        last_name: None,
    }
}

pub fn text_message(text: &str) -> Event {
    Event::Message(Message {
        id: "10".to_string(),
        user: Some(user()),
        chat: Chat::private(USER_ID),
        text: Some(text.to_string()),
        created_at: Utc::now(),
    })
}

pub fn media_message() -> Event {
    Event::Message(Message {
        id: "11".to_string(),
        user: Some(user()),
        chat: Chat::private(USER_ID),
        text: None,
        created_at: Utc::now(),
    })
}

/// Press of the re-check button on the wall message [`WALL_MESSAGE_ID`].
pub fn recheck_press(data: &str) -> Event {
    Event::Callback(CallbackAction {
        id: "cbq-1".to_string(),
        user: user(),
        data: Some(data.to_string()),
        message: Some(MessageRef {
            chat: Chat::private(USER_ID),
            message_id: WALL_MESSAGE_ID.to_string(),
        }),
    })
}
