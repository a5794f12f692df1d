use rocket::{
    http::{ContentType, Status},
    local::asynchronous::{Client, LocalResponse},
    serde::json::{json, Value},
};

use crate::{
    database::{
        requests::{MessageBody, SUBMITTED_MESSAGE},
        ErrorBody, GameScore, MemoryStore, NewScore, ScoreRecord, ScoreStore, SharedStore,
        SqlStore, StoreResult, Submission,
    },
    server,
};

/// A store whose database is gone
struct BrokenStore;

#[rocket::async_trait]
impl ScoreStore for BrokenStore {
    fn capacity(&self) -> usize {
        10
    }

    async fn top(&self, _limit: usize) -> StoreResult<Vec<ScoreRecord>> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn submit(&self, _score: NewScore) -> StoreResult<Submission> {
        Err(sqlx::Error::PoolClosed)
    }
}

async fn spawn_client(store: SharedStore) -> Client {
    Client::tracked(server::build(store))
        .await
        .expect("valid rocket instance")
}

async fn memory_client() -> Client {
    spawn_client(Box::new(MemoryStore::new(10))).await
}

async fn sql_client() -> Client {
    let store = SqlStore::in_memory(10)
        .await
        .expect("in-memory database");
    spawn_client(Box::new(store)).await
}

async fn deserialize_response<'a, T: rocket::serde::DeserializeOwned>(
    response: LocalResponse<'a>,
) -> T {
    let string = response.into_string().await.unwrap();
    rocket::serde::json::from_str(&string).unwrap()
}

/// Posts `body` as JSON to `/scores`
async fn add_score<'a>(client: &'a Client, body: &Value) -> LocalResponse<'a> {
    client.post("/scores").json(body).dispatch().await
}

/// Gets the leaderboard, asserting success
async fn get_scores(client: &Client) -> Vec<ScoreRecord> {
    let response = client.get("/scores").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    deserialize_response(response).await
}

fn scores_of(records: &[ScoreRecord]) -> Vec<GameScore> {
    records.iter().map(|record| record.score).collect()
}

#[rocket::async_test]
async fn index_banner() {
    let client = memory_client().await;
    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().await.unwrap().contains("leaderboard"));
}

#[rocket::async_test]
async fn empty_leaderboard_is_an_empty_array() {
    for client in [memory_client().await, sql_client().await] {
        assert!(get_scores(&client).await.is_empty());
    }
}

#[rocket::async_test]
async fn submission_is_confirmed_and_listed() {
    let client = memory_client().await;

    let response = add_score(&client, &json!({ "name": "Alice", "score": 7 })).await;
    assert_eq!(response.status(), Status::Ok);
    let body: MessageBody = deserialize_response(response).await;
    assert_eq!(body.message, SUBMITTED_MESSAGE);

    let scores = get_scores(&client).await;
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].name, "Alice");
    assert_eq!(scores[0].score, 7.0);
}

/// Eleven sequential submissions leave the ten best
#[rocket::async_test]
async fn eleventh_score_prunes_the_lowest() {
    for client in [memory_client().await, sql_client().await] {
        for score in 1..=11 {
            let body = json!({ "name": format!("player{}", score), "score": score });
            let response = add_score(&client, &body).await;
            assert_eq!(response.status(), Status::Ok);
        }

        let scores = get_scores(&client).await;
        assert_eq!(
            scores_of(&scores),
            (2..=11).rev().map(f64::from).collect::<Vec<_>>()
        );
    }
}

/// Whatever the submission order, the stored set converges to the top ten
#[rocket::async_test]
async fn leaderboard_stays_sorted_and_bounded() {
    let submitted: Vec<GameScore> = vec![
        5.0, 42.0, 17.0, 0.0, 99.0, 3.0, 42.0, 8.0, 61.0, 23.0, 15.0, 7.0, 88.0, 1.0, 30.0,
    ];
    let mut expected = submitted.clone();
    expected.sort_by(|a, b| b.total_cmp(a));
    expected.truncate(10);

    for client in [memory_client().await, sql_client().await] {
        for (index, score) in submitted.iter().enumerate() {
            add_score(&client, &json!({ "name": format!("p{}", index), "score": score })).await;

            let scores = scores_of(&get_scores(&client).await);
            assert!(scores.len() <= 10);
            assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
        }

        assert_eq!(scores_of(&get_scores(&client).await), expected);
    }
}

#[rocket::async_test]
async fn empty_name_is_rejected() {
    for client in [memory_client().await, sql_client().await] {
        let response = add_score(&client, &json!({ "name": "", "score": 5 })).await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: ErrorBody = deserialize_response(response).await;
        assert_eq!(body.error, "Invalid name or score");

        assert!(get_scores(&client).await.is_empty());
    }
}

#[rocket::async_test]
async fn non_numeric_score_is_rejected() {
    for client in [memory_client().await, sql_client().await] {
        let response = add_score(&client, &json!({ "name": "Alice", "score": "high" })).await;
        assert_eq!(response.status(), Status::BadRequest);

        let response = add_score(&client, &json!({ "name": "Alice" })).await;
        assert_eq!(response.status(), Status::BadRequest);

        assert!(get_scores(&client).await.is_empty());
    }
}

#[rocket::async_test]
async fn malformed_body_is_rejected() {
    let client = memory_client().await;

    let response = client
        .post("/scores")
        .header(ContentType::JSON)
        .body("{ not json")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: ErrorBody = deserialize_response(response).await;
    assert_eq!(body.error, "Invalid name or score");

    let response = add_score(&client, &json!([1, 2, 3])).await;
    assert_eq!(response.status(), Status::BadRequest);
}

/// A two-element array lines up with (name, score) but is not an object
#[rocket::async_test]
async fn positional_array_is_rejected() {
    for client in [memory_client().await, sql_client().await] {
        let response = add_score(&client, &json!(["Mallory", 99])).await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: ErrorBody = deserialize_response(response).await;
        assert_eq!(body.error, "Invalid name or score");

        assert!(get_scores(&client).await.is_empty());
    }
}

#[rocket::async_test]
async fn fractional_and_large_scores_are_accepted() {
    for client in [memory_client().await, sql_client().await] {
        for (name, score) in [("half", json!(2.5)), ("huge", json!(1e300)), ("two", json!(2))] {
            let response = add_score(&client, &json!({ "name": name, "score": score })).await;
            assert_eq!(response.status(), Status::Ok);
        }

        let scores = get_scores(&client).await;
        assert_eq!(scores_of(&scores), vec![1e300, 2.5, 2.0]);
    }
}

#[rocket::async_test]
async fn load_failure_is_a_server_error() {
    let client = spawn_client(Box::new(BrokenStore)).await;

    let response = client.get("/scores").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);
    let body: ErrorBody = deserialize_response(response).await;
    assert_eq!(body.error, "Failed to load scores");
}

#[rocket::async_test]
async fn save_failure_is_a_server_error() {
    let client = spawn_client(Box::new(BrokenStore)).await;

    let response = add_score(&client, &json!({ "name": "Alice", "score": 5 })).await;
    assert_eq!(response.status(), Status::InternalServerError);
    let body: ErrorBody = deserialize_response(response).await;
    assert_eq!(body.error, "Failed to save score");

    // Validation still comes first
    let response = add_score(&client, &json!({ "name": "", "score": 5 })).await;
    assert_eq!(response.status(), Status::BadRequest);
}

/// The same (name, score) twice makes two records
#[rocket::async_test]
async fn duplicate_submissions_are_kept() {
    for client in [memory_client().await, sql_client().await] {
        let body = json!({ "name": "Alice", "score": 3 });
        add_score(&client, &body).await;
        add_score(&client, &body).await;

        let scores = get_scores(&client).await;
        assert_eq!(scores.len(), 2);
        assert_ne!(scores[0].id, scores[1].id);
    }
}

/// Among equal scores the earlier submission ranks first and survives
#[rocket::async_test]
async fn ties_favour_earlier_submissions() {
    for client in [memory_client().await, sql_client().await] {
        for index in 0..11 {
            add_score(&client, &json!({ "name": format!("p{}", index), "score": 50 })).await;
        }

        let names: Vec<String> = get_scores(&client)
            .await
            .into_iter()
            .map(|record| record.name)
            .collect();
        let expected: Vec<String> = (0..10).map(|index| format!("p{}", index)).collect();
        assert_eq!(names, expected);
    }
}

#[rocket::async_test]
async fn records_expose_id_and_timestamp() {
    let client = memory_client().await;
    add_score(&client, &json!({ "name": "Alice", "score": 1 })).await;

    let response = client.get("/scores").dispatch().await;
    let records: Vec<Value> = deserialize_response(response).await;
    let record = &records[0];
    assert!(record["id"].is_i64());
    assert!(record["createdAt"].is_string());
    assert_eq!(record["name"], "Alice");
}

#[rocket::async_test]
async fn responses_allow_any_origin() {
    let client = memory_client().await;

    let response = client.get("/scores").dispatch().await;
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let response = client.options("/scores").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert!(response
        .headers()
        .get_one("Access-Control-Allow-Methods")
        .unwrap()
        .contains("POST"));
}

#[rocket::async_test]
async fn unknown_routes_answer_json() {
    let client = memory_client().await;
    let response = client.get("/nowhere").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: ErrorBody = deserialize_response(response).await;
    assert_eq!(body.error, "Not Found");
}
