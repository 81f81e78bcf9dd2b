//! Wire rendering of everything the server says to a client.

use super::{
    entity::HistoryRecord,
    value_object::{MessageText, Timestamp, UserName},
};

/// Prompt shown while the client has to choose a name
pub const NAME_PROMPT: &str = "[ENTER YOUR NAME]: ";

const WELCOME_BANNER: &str = r#"Welcome to TCP-Chat!
         _nnnn_
        dGGGGMMb
       @p~qp~~qMb
       M|@||@) M|
       @,----.JM|
      JS^\__/  qKL
     dZP        qKRb
    dZP          qKKb
   fZP            SMMb
   HZM            MMMM
   FqM            MMMM
 __| ".        |\dS"qML
 |    `.       | `' \Zq
_)      \.___.,|     .'
\____   )MMMMMP|   .'
     `-'       `--'
"#;

/// Message formatter for the line protocol
pub struct MessageFormatter;

impl MessageFormatter {
    /// Banner sent on connect, ending with the name prompt
    pub fn welcome() -> String {
        format!("{}{}", WELCOME_BANNER, NAME_PROMPT)
    }

    /// `[MM-DD-YYYY HH:MM:SS][name]:` with no trailing newline, so the
    /// client's next keystrokes appear inline
    pub fn prompt(timestamp: &Timestamp, name: &UserName) -> String {
        format!("[{}][{}]:", timestamp, name)
    }

    /// A chat line as seen by other clients
    pub fn chat_line(timestamp: &Timestamp, sender: &UserName, text: &MessageText) -> String {
        format!("\n[{}][{}]: {}\n", timestamp, sender, text.as_str())
    }

    pub fn joined(name: &UserName) -> String {
        format!("\n{} has joined our chat...\n", name)
    }

    pub fn left(name: &UserName) -> String {
        format!("\n{} has left our chat...\n", name)
    }

    /// A history record as replayed to a newly joined client
    pub fn history_line(record: &HistoryRecord) -> String {
        format!(
            "[{}][{}]: {}\n",
            record.timestamp,
            record.sender,
            record.text.as_str()
        )
    }

    pub fn invalid_name() -> String {
        format!(
            "User name invalid\nUse only Latin letter with numbers and [-_]\n{}",
            NAME_PROMPT
        )
    }

    pub fn name_taken() -> String {
        format!("Username already exist\n{}", NAME_PROMPT)
    }

    /// Sent right before closing a connection that found the room full
    pub fn room_full(capacity: usize) -> String {
        format!("Number of user is {}, comeback later :)\n", capacity)
    }
}
