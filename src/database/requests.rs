use log::info;
use rocket::http::Status;
use rocket::serde::json::{self, Json, Value};
use rocket::serde::{Deserialize, Serialize};
use rocket::{catch, get, options, post, Request, State};

use super::*;

pub const SUBMITTED_MESSAGE: &str = "Score saved and leaderboard cleaned!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct MessageBody {
    pub message: String,
}

#[get("/")]
pub fn index() -> &'static str {
    "This is a snake leaderboard server!"
}

/// Fetches the current leaderboard, best score first.
#[get("/scores")]
pub async fn get_scores(store: &State<SharedStore>) -> RequestResult<Json<Vec<ScoreRecord>>> {
    let scores = store
        .top(store.capacity())
        .await
        .map_err(RequestError::load_failed)?;

    Ok(Json(scores))
}

/// Stores a new score and prunes everything outside the top of the leaderboard.
/// Validation happens before the store is touched.
#[post("/scores", data = "<body>")]
pub async fn add_score(
    body: Result<Json<Value>, json::Error<'_>>,
    store: &State<SharedStore>,
) -> RequestResult<Json<MessageBody>> {
    let body =
        body.map_err(|error| RequestError::invalid_input(format!("malformed body: {}", error)))?;
    let new_score = ScoreSubmission::from_json(body.into_inner())?.validate()?;

    let submission = store
        .submit(new_score)
        .await
        .map_err(RequestError::save_failed)?;

    let record = &submission.record;
    if submission.ranked {
        info!(
            "Score {} by {} entered the leaderboard (id {}, {} pruned)",
            record.score, record.name, record.id, submission.pruned
        );
    } else {
        info!(
            "Score {} by {} did not rank and was pruned",
            record.score, record.name
        );
    }

    Ok(Json(MessageBody {
        message: SUBMITTED_MESSAGE.to_owned(),
    }))
}

/// Answers CORS preflight requests for any path.
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::Ok
}

/// Renders every unhandled error status as a JSON body.
#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let reason = status.reason().unwrap_or("Unknown Error");
    (status, Json(ErrorBody::new(reason)))
}
