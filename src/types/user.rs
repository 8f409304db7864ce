use serde::Deserialize;

/// A user as returned by `/rest/api/3/user/search`.
#[derive(Deserialize, Debug, Clone)]
pub struct User {
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    /// Hidden unless the user's privacy settings expose it.
    #[serde(rename = "emailAddress")]
    pub email_address: Option<String>,
}

impl User {
    pub fn label(&self) -> String {
        match &self.email_address {
            Some(email) => format!("{} <{email}>", self.display_name),
            None => format!("{} ({})", self.display_name, self.account_id),
        }
    }
}
