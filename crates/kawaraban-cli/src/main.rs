// kawaraban: news recommendation assistant over a chat completion endpoint.
// Text-mode frontend; speech providers are swapped in behind the core traits.

mod cli;

use kawaraban_core::api::{TurnOutcome, run_multiturn_conversation};
use kawaraban_core::llm::{ChatEndpoint, HttpChatEndpoint};
use kawaraban_core::safety::content_filtering_message;
use kawaraban_core::speech::{FixedLanguage, IdentityTranslator, LanguageDetector, Synthesizer, Translator};
use kawaraban_core::tools::news::{NewsStore, register_news_tools};
use kawaraban_core::tools::ToolRegistry;
use kawaraban_core::transcript::Transcript;
use kawaraban_core::{Config, SYSTEM_PROMPT};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Text-mode stand-in for a speech synthesizer: prints to stdout.
struct ConsoleSynthesizer;

impl Synthesizer for ConsoleSynthesizer {
    fn speak(&mut self, text: &str, _lang: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }
}

struct Session<E> {
    endpoint: E,
    config: Config,
    registry: ToolRegistry,
    transcript: Transcript,
    detector: FixedLanguage,
    translator: IdentityTranslator,
    synthesizer: ConsoleSynthesizer,
    verbose: bool,
}

impl<E: ChatEndpoint> Session<E> {
    /// Run one user turn to completion and present the reply.
    ///
    /// Final answers and content-filter apologies both become assistant
    /// transcript entries; rejected tool calls only reach stderr and leave
    /// the transcript untouched.
    async fn run_turn(&mut self, user_text: &str) -> io::Result<()> {
        let lang = self.detector.detect(user_text)?;
        self.transcript.push_user(user_text);

        let outcome = run_multiturn_conversation(
            &self.endpoint,
            &self.config.model,
            &mut self.transcript,
            &self.registry,
            self.config.max_tool_turns,
            self.verbose,
        )
        .await?;

        match outcome {
            TurnOutcome::Answer(completion) => {
                let text = completion
                    .answer_text()
                    .unwrap_or("I don't have an answer for that.")
                    .to_string();
                let spoken = if lang == "en-US" {
                    text.clone()
                } else {
                    self.translator.translate(&text, &lang)?
                };
                self.transcript.push_assistant(&text);
                self.synthesizer.speak(&spoken, &lang)?;
            }
            TurnOutcome::Filtered => {
                let message = content_filtering_message(&lang, &self.translator)?;
                self.transcript.push_assistant(&message);
                self.synthesizer.speak(&message, &lang)?;
            }
            TurnOutcome::Rejected(reason) => {
                eprintln!("[{}]", reason);
            }
        }
        Ok(())
    }
}

fn read_line(prompt: &str) -> io::Result<Option<String>> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(line.trim().to_string()))
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = cli::parse();

    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(news) = args.news {
        config.news_path = news;
    }

    let store = Arc::new(NewsStore::load(&config.news_path)?);
    if args.verbose {
        eprintln!("[Loaded {} articles from {}]", store.len(), config.news_path.display());
    }

    let mut registry = ToolRegistry::new();
    register_news_tools(&mut registry, store);

    let mut session = Session {
        endpoint: HttpChatEndpoint::new(&config),
        detector: FixedLanguage::new(&config.language),
        translator: IdentityTranslator,
        synthesizer: ConsoleSynthesizer,
        registry,
        transcript: Transcript::new(SYSTEM_PROMPT),
        verbose: args.verbose,
        config,
    };

    if !args.prompt.is_empty() {
        let prompt = args.prompt.join(" ");
        return session.run_turn(&prompt).await;
    }

    // Interactive loop. The transcript persists across turns, so follow-up
    // questions can refer back to earlier recommendations.
    loop {
        let line = match read_line("> ")? {
            Some(line) => line,
            None => break,
        };
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        session.run_turn(&line).await?;
    }

    Ok(())
}
