pub mod conversation_state;
pub mod prompt;
pub mod render;

use std::io::Write;
use std::process::ExitCode;

use conversation_state::ConversationState;
use eyre::Result;
use prompt::generate_prompt;
use tracing::{debug, warn};

use crate::generate_client::GenerateClient;

/// Shown when the endpoint fails or returns nothing usable.
pub const FALLBACK_TEXT: &str = "Sorry, I can't understand you";

const WELCOME_TEXT: &str = "
Ask Bing-Bong
Me Bong, you ask.

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
Bing-Bong chat

/clear        Discard the conversation and start over
/help         Show this help dialogue
/quit         Quit the application
";

pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    conversation_state: ConversationState,
    client: GenerateClient,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        client: GenerateClient,
    ) -> Self {
        Self {
            output,
            input,
            interactive,
            conversation_state: ConversationState::new(),
            client,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if self.interactive {
            self.print_welcome()?;
        }

        // Non-interactive mode: one submission cycle, then exit.
        if let Some(input) = self.input.take() {
            self.submit(&input).await?;
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            // Reading only resumes once the previous cycle has resolved, so
            // the input surface is closed for the whole pending interval.
            let prompt_text = generate_prompt(self.conversation_state.is_pending());
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted)
                | Err(rustyline::error::ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        match input.trim() {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/clear" => {
                self.conversation_state = ConversationState::new();
                writeln!(self.output, "Conversation cleared.")?;
            }
            _ => {
                self.submit(input).await?;
            }
        }

        Ok(())
    }

    /// One full submission cycle: append the user entry, send the prompt,
    /// append exactly one bot entry. A failed or malformed completion
    /// resolves to the fallback text; the cycle always ends idle.
    async fn submit(&mut self, input: &str) -> Result<()> {
        let Some(user_entry) = self.conversation_state.begin(input) else {
            debug!("Submission refused while a request is pending");
            return Ok(());
        };
        writeln!(self.output, "{}", render::entry_line(&user_entry))?;

        let text = match self.client.generate(input).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Falling back to canned reply: {}", e);
                FALLBACK_TEXT.to_string()
            }
        };

        let bot_entry = self.conversation_state.resolve(text);
        writeln!(self.output, "{}", render::entry_line(&bot_entry))?;

        Ok(())
    }
}
