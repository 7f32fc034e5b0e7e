//! Question and answer endpoint handlers

use axum::{
  extract::{Extension, Json, Path, Query},
  http::StatusCode,
  response::Json as ResponseJson,
};
use uuid::Uuid;

use crate::error::MonitorError;
use crate::server::handlers::error_response;
use crate::server::middleware::RequestContext;
use crate::server::models::answer::{self, Answer};
use crate::server::models::question::{self, Question};
use crate::server::types::{
  AiEngagementRequest, BaseResponse, CreateAnswerRequest, CreateAnswerResponse,
  CreateQuestionRequest, CreateQuestionResponse, ForceEngagementResponse, ListAnswersResponse,
  ListQuestionsResponse, QuestionQuery,
};

type HandlerResult<T> =
  Result<ResponseJson<BaseResponse<T>>, (StatusCode, ResponseJson<BaseResponse<()>>)>;

/// GET /api/questions - List questions with sort and limit
pub async fn list_questions(
  Extension(context): Extension<RequestContext>,
  Query(query): Query<QuestionQuery>,
) -> HandlerResult<ListQuestionsResponse> {
  let transaction_id = Uuid::new_v4();

  match question::list(query.sort_by, query.limit) {
    Ok(questions) => {
      Ok(ResponseJson(BaseResponse::success(ListQuestionsResponse { questions }, transaction_id)))
    }
    Err(e) => {
      context.log_error(&format!("Failed to list questions: {e}"), "questions-api").await;
      Err(error_response(&MonitorError::Upstream(e.to_string()), transaction_id))
    }
  }
}

/// POST /api/questions - Create a question
pub async fn create_question(
  Extension(context): Extension<RequestContext>,
  Json(request): Json<CreateQuestionRequest>,
) -> HandlerResult<CreateQuestionResponse> {
  let transaction_id = Uuid::new_v4();

  if request.title.trim().is_empty() || request.content.trim().is_empty() {
    let err = MonitorError::Validation("title and content must be non-empty".to_string());
    return Err(error_response(&err, transaction_id));
  }

  let new_question =
    Question::new(request.title, request.content, request.tags, request.author);

  match question::save(&new_question) {
    Ok(()) => {
      context
        .log_success(&format!("Created question {}", new_question.id), "questions-api")
        .await;
      Ok(ResponseJson(BaseResponse::success(
        CreateQuestionResponse { question: new_question },
        transaction_id,
      )))
    }
    Err(e) => {
      context.log_error(&format!("Failed to create question: {e}"), "questions-api").await;
      Err(error_response(&MonitorError::Upstream(e.to_string()), transaction_id))
    }
  }
}

/// POST /api/questions/{id}/answers - Create an answer
pub async fn create_answer(
  Extension(context): Extension<RequestContext>,
  Path(question_id): Path<Uuid>,
  Json(request): Json<CreateAnswerRequest>,
) -> HandlerResult<CreateAnswerResponse> {
  let transaction_id = Uuid::new_v4();

  if request.content.trim().is_empty() {
    let err = MonitorError::Validation("answer content must be non-empty".to_string());
    return Err(error_response(&err, transaction_id));
  }

  if question::load(&question_id).is_err() {
    let err = MonitorError::NotFound(format!("Question {question_id} not found"));
    return Err(error_response(&err, transaction_id));
  }

  let new_answer = Answer::new(question_id, request.content, request.author, false);

  match answer::create(&new_answer) {
    Ok(()) => {
      context
        .log_success(
          &format!("Created answer {} for question {question_id}", new_answer.id),
          "questions-api",
        )
        .await;
      Ok(ResponseJson(BaseResponse::success(
        CreateAnswerResponse { answer: new_answer },
        transaction_id,
      )))
    }
    Err(e) => {
      context.log_error(&format!("Failed to create answer: {e}"), "questions-api").await;
      Err(error_response(&MonitorError::Upstream(e.to_string()), transaction_id))
    }
  }
}

/// GET /api/questions/{id}/answers - List answers for a question
pub async fn list_answers(
  Extension(context): Extension<RequestContext>,
  Path(question_id): Path<Uuid>,
) -> HandlerResult<ListAnswersResponse> {
  let transaction_id = Uuid::new_v4();

  if question::load(&question_id).is_err() {
    let err = MonitorError::NotFound(format!("Question {question_id} not found"));
    return Err(error_response(&err, transaction_id));
  }

  match answer::list_for_question(&question_id) {
    Ok(answers) => {
      Ok(ResponseJson(BaseResponse::success(ListAnswersResponse { answers }, transaction_id)))
    }
    Err(e) => {
      context.log_error(&format!("Failed to list answers: {e}"), "questions-api").await;
      Err(error_response(&MonitorError::Upstream(e.to_string()), transaction_id))
    }
  }
}

/// POST /api/questions/ai-engagement - Engage one question on demand
pub async fn ai_engagement(
  Extension(context): Extension<RequestContext>,
  Json(request): Json<AiEngagementRequest>,
) -> HandlerResult<ForceEngagementResponse> {
  let transaction_id = Uuid::new_v4();

  context
    .log_info(&format!("Targeted engagement requested for {}", request.question_id), "questions-api")
    .await;

  let mut monitor = context.app.monitor.lock().await;
  match monitor.engage(&request.question_id, request.persona.as_deref()).await {
    Ok(outcome) => {
      context
        .log_success(
          &format!("Answered question {} as {}", outcome.question_id, outcome.persona_id),
          "questions-api",
        )
        .await;
      let response = ForceEngagementResponse { success: true, engagement: Some(outcome) };
      Ok(ResponseJson(BaseResponse::success(response, transaction_id)))
    }
    Err(e) => {
      context.log_warn(&format!("Targeted engagement failed: {e}"), "questions-api").await;
      Err(error_response(&e, transaction_id))
    }
  }
}
