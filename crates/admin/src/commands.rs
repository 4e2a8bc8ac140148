//! Command dispatch onto the stores.
//!
//! Every command returns a JSON value for stdout. A failure recorded in
//! store state is turned into an error so the process exits non-zero.

use anyhow::{bail, Context};
use serde_json::{json, Value};

use fundhub_core::resource::{Resource, Suspendable, Verifiable};
use fundhub_gateway::{HttpGateway, SessionStore};
use fundhub_stores::{ResourceStore, StoreState, VerifyEndpoint};

use crate::cli::{AccountAction, PageArgs, ReadAction, VerifiedAction};

pub async fn login(gateway: &HttpGateway, email: &str, password: &str) -> anyhow::Result<Value> {
    let session = gateway.session();
    if session.take_redirect_marker() {
        tracing::info!("Previous session expired; signing in again");
    }
    let result = gateway
        .sign_in(email, password)
        .await
        .context("sign-in request failed")?;
    if !result.success {
        bail!(result.message);
    }
    let profile = session.snapshot().await.user;
    Ok(json!({ "message": result.message, "user": profile }))
}

pub async fn logout(gateway: &HttpGateway) -> Value {
    gateway.sign_out().await;
    json!({ "message": "Signed out" })
}

pub async fn whoami(session: &SessionStore) -> Value {
    let state = session.snapshot().await;
    json!({
        "authenticated": state.is_authenticated,
        "user": state.user,
        "sessionExpired": session.redirected_due_to_auth_error(),
    })
}

fn settled<R: Resource>(state: &StoreState<R>) -> anyhow::Result<()> {
    match &state.error {
        Some(error) => bail!(error.clone()),
        None => Ok(()),
    }
}

pub async fn read<R: Resource>(store: &ResourceStore<R>, action: ReadAction) -> anyhow::Result<Value> {
    match action {
        ReadAction::List(PageArgs { page, limit }) => {
            store.fetch_list(page, limit).await;
            let state = store.snapshot();
            settled(&state)?;
            let pagination = state.pagination;
            Ok(json!({
                "items": state.items,
                "pagination": pagination,
                "hasNext": pagination.is_some_and(|p| p.has_next()),
            }))
        }
        ReadAction::Show { id } => {
            store.fetch_by_id(&id).await;
            let state = store.snapshot();
            settled(&state)?;
            Ok(serde_json::to_value(&state.detail)?)
        }
        ReadAction::Search { query } => {
            store.search(&query).await;
            let state = store.snapshot();
            settled(&state)?;
            if state.search_active && state.search_results.is_empty() {
                tracing::info!("{}", StoreState::<R>::no_matches_message());
            }
            Ok(json!({ "query": state.search_query, "results": state.search_results }))
        }
        ReadAction::Delete { id } => {
            store.delete(&id).await;
            let state = store.snapshot();
            settled(&state)?;
            Ok(json!({ "deleted": id, "message": state.message }))
        }
        ReadAction::Dashboard => {
            store.fetch_dashboard().await;
            let state = store.snapshot();
            settled(&state)?;
            Ok(serde_json::to_value(&state.dashboard)?)
        }
    }
}

pub async fn account<R>(store: &ResourceStore<R>, action: AccountAction) -> anyhow::Result<Value>
where
    R: Resource + Suspendable,
    R::Detail: Suspendable,
{
    let result = match action {
        AccountAction::Read(action) => return read(store, action).await,
        AccountAction::Suspend { id } => store.suspend(&id).await,
        AccountAction::Unsuspend { id } => store.unsuspend(&id).await,
    };
    let result = result.map_err(|e| anyhow::anyhow!(e.user_message("Status change failed")))?;
    Ok(serde_json::to_value(result)?)
}

pub async fn verified<R>(store: &ResourceStore<R>, action: VerifiedAction) -> anyhow::Result<Value>
where
    R: Resource + Suspendable + Verifiable + VerifyEndpoint,
    R::Detail: Suspendable + Verifiable,
{
    match action {
        VerifiedAction::Account(action) => account(store, action).await,
        VerifiedAction::Verify { id } => {
            let result = store.verify(&id).await?;
            if !result.success {
                bail!(result.message);
            }
            Ok(serde_json::to_value(result)?)
        }
    }
}
