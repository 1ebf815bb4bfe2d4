//! The `quizkit add-account` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::model::{AccountDraft, Role};
use quizkit_store::{AccountStore, JsonStore};

use crate::config::resolve_data_dir;

pub async fn execute(
    username: String,
    email: String,
    role: String,
    name: String,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let role: Role = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let draft = AccountDraft {
        username,
        email,
        role,
        display_name: name,
    };
    let validation = draft.validate();
    if !validation.is_valid() {
        for e in &validation.errors {
            eprintln!("  ERROR: {e}");
        }
        anyhow::bail!("account failed validation");
    }

    let store = JsonStore::open(resolve_data_dir(data_dir)?).await?;

    // Username and email are unique within the collection; the store stays
    // generic, so the check lives here.
    if store.account_by_username(&draft.username).await?.is_some() {
        anyhow::bail!("username '{}' is already taken", draft.username);
    }
    if store
        .list_accounts()
        .await?
        .iter()
        .any(|a| a.email == draft.email)
    {
        anyhow::bail!("email '{}' is already registered", draft.email);
    }

    let account = store.create_account(draft).await?;
    println!("Created {} account: {}", account.role, account.id);

    Ok(())
}
