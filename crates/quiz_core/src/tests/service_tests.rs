use super::*;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use shared::domain::{CapitalLocation, Country};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServiceState {
    question_bodies: Arc<Mutex<Vec<QuestionRequest>>>,
    answer_bodies: Arc<Mutex<Vec<CheckAnswerRequest>>>,
}

async fn handle_question(
    State(state): State<ServiceState>,
    Json(payload): Json<QuestionRequest>,
) -> Json<serde_json::Value> {
    let done = payload.asked.len() >= 2;
    state.question_bodies.lock().await.push(payload);
    if done {
        Json(serde_json::json!({
            "game_over": true,
            "message": "Congratulations! You've answered all the capitals of the world!"
        }))
    } else {
        Json(serde_json::json!({ "country": "France" }))
    }
}

async fn handle_check_answer(
    State(state): State<ServiceState>,
    Json(payload): Json<CheckAnswerRequest>,
) -> Result<Json<AnswerResult>, (StatusCode, Json<ApiError>)> {
    state.answer_bodies.lock().await.push(payload.clone());
    if payload.country.as_str() != "France" {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new("Question not found")),
        ));
    }
    let correct = payload.answer.trim().eq_ignore_ascii_case("paris");
    Ok(Json(AnswerResult {
        correct,
        message: if correct {
            "Correct! The capital of France is Paris.".to_string()
        } else {
            "Sorry, the correct answer is Paris.".to_string()
        },
        location: CapitalLocation {
            lat: 48.8566,
            lon: 2.3522,
            capital: "Paris".to_string(),
        },
    }))
}

async fn spawn_quiz_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn spawn_capitals_server() -> (String, ServiceState) {
    let state = ServiceState::default();
    let app = Router::new()
        .route("/api/question", post(handle_question))
        .route("/api/check_answer", post(handle_check_answer))
        .with_state(state.clone());
    (spawn_quiz_server(app).await, state)
}

fn france() -> Country {
    Country::new("France").expect("country")
}

#[tokio::test]
async fn next_question_posts_asked_list_and_parses_country() {
    let (url, state) = spawn_capitals_server().await;
    let service = HttpQuizService::parse(&url).expect("service");

    let response = service
        .next_question(&QuestionRequest::default())
        .await
        .expect("question");
    assert_eq!(response, QuestionResponse::Question { country: france() });

    let response = service
        .next_question(&QuestionRequest {
            asked: vec![france(), Country::new("Japan").expect("country")],
        })
        .await
        .expect("question");
    assert!(matches!(response, QuestionResponse::GameOver { .. }));

    let bodies = state.question_bodies.lock().await;
    assert!(bodies[0].asked.is_empty());
    assert_eq!(bodies[1].asked.len(), 2);
}

#[tokio::test]
async fn check_answer_round_trips_result() {
    let (url, state) = spawn_capitals_server().await;
    let service = HttpQuizService::parse(&url).expect("service");

    let result = service
        .check_answer(&CheckAnswerRequest {
            answer: "Paris".to_string(),
            country: france(),
        })
        .await
        .expect("result");

    assert!(result.correct);
    assert_eq!(result.location.capital, "Paris");
    assert_eq!(state.answer_bodies.lock().await[0].answer, "Paris");
}

#[tokio::test]
async fn non_success_status_becomes_status_error_with_detail() {
    let (url, _state) = spawn_capitals_server().await;
    let service = HttpQuizService::parse(&url).expect("service");

    let err = service
        .check_answer(&CheckAnswerRequest {
            answer: "Atlantis".to_string(),
            country: Country::new("Nowhere").expect("country"),
        })
        .await
        .expect_err("must fail");

    match err {
        TransportError::Status { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Question not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn server_error_without_body_uses_reason_phrase() {
    let app = Router::new().route(
        "/api/question",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let url = spawn_quiz_server(app).await;
    let service = HttpQuizService::parse(&url).expect("service");

    let err = service
        .next_question(&QuestionRequest::default())
        .await
        .expect_err("must fail");

    match err {
        TransportError::Status { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Internal Server Error");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn question_without_country_is_malformed() {
    let app = Router::new().route(
        "/api/question",
        post(|| async { Json(serde_json::json!({ "game_over": false })) }),
    );
    let url = spawn_quiz_server(app).await;
    let service = HttpQuizService::parse(&url).expect("service");

    let err = service
        .next_question(&QuestionRequest::default())
        .await
        .expect_err("must fail");

    assert!(matches!(err, TransportError::Malformed(_)), "{err}");
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let service = HttpQuizService::parse(&format!("http://{addr}")).expect("service");

    let err = service
        .next_question(&QuestionRequest::default())
        .await
        .expect_err("must fail");

    assert!(matches!(err, TransportError::Network(_)), "{err}");
}

#[test]
fn base_url_with_path_keeps_prefix() {
    let service = HttpQuizService::parse("http://quiz.example/geo").expect("service");
    assert_eq!(service.base_url().as_str(), "http://quiz.example/geo/");
    assert_eq!(
        service.base_url().join(QUESTION_PATH).expect("join").as_str(),
        "http://quiz.example/geo/api/question"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    assert!(matches!(
        HttpQuizService::parse("not a url"),
        Err(TransportError::Endpoint(_))
    ));
}
