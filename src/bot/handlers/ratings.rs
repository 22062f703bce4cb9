use anyhow::Result;

use super::BotContext;
use crate::bot::reply::Reply;
use crate::reports;
use crate::services::today;

pub fn start() -> Reply {
    Reply::text("Hello, chess boys!")
}

/// `/live`: scrape every tracked profile now
pub async fn live(ctx: &mut BotContext, message_id: i64) -> Reply {
    let snapshots = ctx.ratings.live_ratings(today()).await;
    Reply::text(reports::live_report(&snapshots)).replying_to(message_id)
}

/// `/rating`: what the snapshot job stored today
pub fn stored(ctx: &BotContext, message_id: i64) -> Result<Reply> {
    let snapshots = ctx.ratings.stored_for_date(today())?;
    Ok(Reply::text(reports::stored_report(&snapshots)).replying_to(message_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ratings::tests::test_service;

    #[test]
    fn test_stored_without_rows() {
        let (config, service) = test_service("handler_stored");
        let ctx = BotContext::with_service(config, service);

        let reply = stored(&ctx, 5).unwrap();

        assert_eq!(
            reply,
            Reply::Text {
                text: reports::NO_STORED_RATINGS.to_string(),
                keyboard: None,
                reply_to: Some(5),
            }
        );
    }
}
