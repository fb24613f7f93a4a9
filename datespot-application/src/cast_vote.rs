use super::*;
use crate::{remote::remote_call, session::Session};
use std::time::Duration;
use usecases::VoteOutcome;

/// Casts, switches or removes the vote of the signed-in user.
pub async fn cast_vote<D>(
    db: &D,
    session: &Session,
    spot_id: &Id,
    action: VoteAction,
    timeout: Duration,
) -> Result<VoteOutcome>
where
    D: VoteRepo + ?Sized,
{
    let user = session.current_user();
    let votes = session.user_votes();
    let outcome = remote_call(
        timeout,
        "cast vote",
        usecases::cast_vote(db, user.as_ref(), &votes, spot_id, action),
    )
    .await
    .inspect_err(|err| warn!("Failed to {} vote on spot {}: {}", action, spot_id, err))?;
    session.apply_vote(spot_id, outcome.transition);
    Ok(outcome)
}
