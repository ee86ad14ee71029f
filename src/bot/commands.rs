use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommand {
    #[command(description = "Start / restart the bot")]
    Start,
    #[command(description = "Show help")]
    Help,
}

/// `/f<uuid>` and `/c<uuid>` links printed next to list entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailCommand {
    Film(String),
    Cinema(String),
}

impl DetailCommand {
    /// Parse the first token of a message; everything after the one-letter
    /// prefix is the uuid. A trailing `@botname` (group chats) is dropped.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?;
        let token = token.split_once('@').map_or(token, |(head, _)| head);
        let rest = token.strip_prefix('/')?;

        let (kind, uuid) = rest.split_at(rest.chars().next()?.len_utf8());
        if uuid.is_empty() {
            return None;
        }

        match kind {
            "f" => Some(Self::Film(uuid.to_string())),
            "c" => Some(Self::Cinema(uuid.to_string())),
            _ => None,
        }
    }
}
