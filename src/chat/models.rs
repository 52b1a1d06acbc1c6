use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

/// One role-tagged entry of a transcript. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SamplingOptions {
    pub temperature: f64,
}

// Wire shape of a chat-completion request. The transcript is borrowed, not copied.
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub option: SamplingOptions,
    pub messages: &'a [Turn],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_to_wire_shape() {
        let turns = vec![Turn::system("Be terse."), Turn::user("Hi")];
        let request = CompletionRequest {
            model: "m",
            option: SamplingOptions { temperature: 0.7 },
            messages: &turns,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "m",
                "option": { "temperature": 0.7 },
                "messages": [
                    { "role": "system", "content": "Be terse." },
                    { "role": "user", "content": "Hi" }
                ]
            })
        );
    }

    #[test]
    fn turn_constructors_tag_roles() {
        assert_eq!(Turn::system("s").role(), Role::System);
        assert_eq!(Turn::user("u").role(), Role::User);
        assert_eq!(Turn::assistant("a").role(), Role::Assistant);
        assert_eq!(Turn::assistant("a").content(), "a");
    }
}
