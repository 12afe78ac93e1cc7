use serde::{Deserialize, Serialize};

use crate::feed::message::Message;

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "signup")]
    Signup { username: String, password: String },

    #[serde(rename = "login")]
    Login { username: String, password: String },

    #[serde(rename = "auth")]
    Auth { token: String },

    #[serde(rename = "append")]
    Append { body: String },

    #[serde(rename = "list")]
    List,

    #[serde(rename = "subscribe")]
    Subscribe,

    #[serde(rename = "unsubscribe")]
    Unsubscribe,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "signup_response")]
    SignupResponse {},

    #[serde(rename = "login_response")]
    LoginResponse { token: String },

    #[serde(rename = "authenticated")]
    Authenticated {},

    /// The accepted message, echoed back to the poster.
    #[serde(rename = "appended")]
    Appended { message: Message },

    /// Full history, oldest first.
    #[serde(rename = "history")]
    History { messages: Vec<Message> },

    /// Live push of a newly accepted message.
    #[serde(rename = "message:new")]
    MessageNew { message: Message },

    #[serde(rename = "error")]
    Error { code: String, message: String },
}
