use parking_lot::Mutex;
use std::fmt::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use super::completion::{CompletionError, CompletionProvider};
use super::conversation::{Conversation, Message, Role};
use super::rate_limit::RateLimiter;
use crate::search::{LocalSearch, SearchResult};
use crate::utils::format_km;

pub const MSG_API_KEY: &str = "Erro de configuração da API. Por favor, contate o suporte técnico.";
pub const MSG_RATE_LIMITED: &str = "Sistema temporariamente ocupado. Por favor, tente novamente em alguns segundos.";
pub const MSG_QUOTA: &str = "Limite de uso atingido. Por favor, tente novamente mais tarde.";
pub const MSG_GENERIC: &str = "Desculpe, ocorreu um erro ao processar sua solicitação. Por favor, tente novamente em alguns momentos.";
pub const MSG_NO_RESULTS: &str = "Não encontrei locais que correspondam à sua pesquisa. Experimente outra categoria ou localidade da região.";


pub fn user_message(error: &CompletionError) -> &'static str {
    match error {
        CompletionError::ApiKey(_) => MSG_API_KEY,
        CompletionError::RateLimited(_) => MSG_RATE_LIMITED,
        CompletionError::QuotaExceeded(_) => MSG_QUOTA,
        CompletionError::EmptyResponse | CompletionError::Provider(_) => MSG_GENERIC,
    }
}

/// Plain-text answer listing the results, used when no completion service is attached.
pub fn render_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return MSG_NO_RESULTS.to_string();
    }

    let mut out = String::from("Locais encontrados:\n\n");
    for (index, result) in results.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, result.name);
        let _ = writeln!(out, "   Categoria: {}", result.category);
        if !result.description.is_empty() {
            let _ = writeln!(out, "   Descrição: {}", result.description);
        }
        if !result.location.is_empty() {
            let _ = writeln!(out, "   Localização: {}", result.location);
        }
        if let Some(distance) = result.distance {
            let _ = writeln!(out, "   Distância: {}", format_km(distance));
        }
        if let Some(url) = &result.url {
            let _ = writeln!(out, "   Mais informações: {url}");
        }
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One chat session: runs the local search for each user message and produces the bot reply.
pub struct Orchestrator {
    search: Arc<LocalSearch>,
    completion: Option<Arc<dyn CompletionProvider>>,
    limiter: RateLimiter,
    conversation: Mutex<Conversation>,
    busy: AtomicBool,
}

impl Orchestrator {
    pub fn new(
        search: Arc<LocalSearch>,
        completion: Option<Arc<dyn CompletionProvider>>,
        limiter: RateLimiter,
    ) -> Self {
        Self {
            search,
            completion,
            limiter,
            conversation: Mutex::new(Conversation::new()),
            busy: AtomicBool::new(false),
        }
    }

    /// Returns the bot reply, or `None` when the input is blank or a message is
    /// already being processed.
    pub async fn process_message(&self, input: &str) -> Option<Message> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            warn!("Message ignored, previous one still in progress");
            return None;
        }
        let _guard = BusyGuard(&self.busy);

        self.conversation.lock().push(Role::User, input);

        let results = self.search.search_local_data(input).await;
        let reply = self.answer(input, &results).await;

        Some(self.conversation.lock().push(Role::Bot, reply))
    }

    async fn answer(&self, query: &str, results: &[SearchResult]) -> String {
        let Some(completion) = &self.completion else {
            return render_results(results);
        };

        if !self.limiter.try_acquire() {
            warn!("Completion request refused by rate limiter");
            return MSG_RATE_LIMITED.to_string();
        }
        debug!("{} completion request(s) left in window", self.limiter.remaining());

        match completion.complete(query, results).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "Completion from {} ({} local result(s))",
                    completion.provider_name(),
                    results.len()
                );
                text
            }
            Ok(_) => {
                warn!("Empty completion from {}", completion.provider_name());
                user_message(&CompletionError::EmptyResponse).to_string()
            }
            Err(e) => {
                warn!("Completion provider {} failed: {}", completion.provider_name(), e);
                user_message(&e).to_string()
            }
        }
    }

    pub fn messages(&self) -> Vec<Message> {
        self.conversation.lock().messages().to_vec()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}
