use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{Html, Redirect},
    Form,
};
use tracing::info;

use crate::domain::parse_id;
use crate::errors::AppError;
use crate::render::Page;
use crate::rest::AppState;
use shared::AcronymData;

/// GET /
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    info!("GET /");
    let acronyms = state.acronyms.list().await?;
    // The view distinguishes "no acronyms" from an empty list
    let acronyms = if acronyms.is_empty() {
        None
    } else {
        Some(acronyms)
    };
    let document = state.renderer.render(Page::Index {
        title: "Homepage".to_string(),
        acronyms,
    })?;
    Ok(Html(document))
}

/// GET /acronyms/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    info!("GET /acronyms/{}", id);
    let acronym = state.acronyms.get(parse_id(&id)?).await?;
    let document = state.renderer.render(Page::Acronym {
        title: acronym.short.clone(),
        acronym,
    })?;
    Ok(Html(document))
}

/// GET /acronyms/create
pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    info!("GET /acronyms/create");
    let document = state.renderer.render(Page::CreateAcronym {
        title: "Create An Acronym".to_string(),
    })?;
    Ok(Html(document))
}

/// POST /acronyms/create
pub async fn create_submit(
    State(state): State<AppState>,
    payload: Result<Form<AcronymData>, FormRejection>,
) -> Result<Redirect, AppError> {
    info!("POST /acronyms/create");
    let Form(data) = payload.map_err(|_| AppError::BadRequest("Invalid acronym form"))?;
    let acronym = state.acronyms.create(data).await?;
    Ok(Redirect::to(&format!("/acronyms/{}", acronym.id)))
}

/// GET /acronyms/:id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    info!("GET /acronyms/{}/edit", id);
    let acronym = state.acronyms.get(parse_id(&id)?).await?;
    let document = state.renderer.render(Page::EditAcronym {
        title: "Edit Acronym".to_string(),
        acronym,
    })?;
    Ok(Html(document))
}

/// POST /acronyms/:id/edit
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Form<AcronymData>, FormRejection>,
) -> Result<Redirect, AppError> {
    info!("POST /acronyms/{}/edit", id);
    let id = parse_id(&id)?;
    let Form(data) = payload.map_err(|_| AppError::BadRequest("Invalid acronym form"))?;
    let acronym = state.acronyms.update(id, data).await?;
    Ok(Redirect::to(&format!("/acronyms/{}", acronym.id)))
}

/// POST /acronyms/:id/delete
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    info!("POST /acronyms/{}/delete", id);
    state.acronyms.delete(parse_id(&id)?).await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use crate::domain::{AcronymService, UserService};
    use crate::render::HtmlRenderer;
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use shared::{User, UserData};
    use std::sync::Arc;

    async fn setup_test_state() -> (AppState, User) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let state = AppState::new(
            AcronymService::new(db.clone()),
            UserService::new(db),
            Arc::new(HtmlRenderer),
        );
        let author = state
            .users
            .create(UserData {
                name: "Alice".to_string(),
                username: "alice".to_string(),
            })
            .await
            .expect("Failed to seed user");
        (state, author)
    }

    fn form(short: &str, long: &str, user_id: i64) -> Result<Form<AcronymData>, FormRejection> {
        Ok(Form(AcronymData {
            short: short.to_string(),
            long: long.to_string(),
            user_id,
        }))
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("Redirect should carry a Location header")
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_reports_empty_store() {
        let (state, _) = setup_test_state().await;

        let Html(document) = index(State(state)).await.unwrap();
        assert!(document.contains("There aren't any acronyms yet!"));
    }

    #[tokio::test]
    async fn test_create_redirects_to_detail_page() {
        let (state, author) = setup_test_state().await;

        let redirect = create_submit(State(state.clone()), form("LOL", "laugh out loud", author.id))
            .await
            .unwrap();
        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let target = location(&response).to_string();
        assert!(target.starts_with("/acronyms/"));

        // The detail page behind the redirect shows the new acronym
        let id = target.rsplit('/').next().unwrap().to_string();
        let Html(document) = show(State(state), Path(id)).await.unwrap();
        assert!(document.contains("laugh out loud"));
    }

    #[tokio::test]
    async fn test_edit_overwrites_and_redirects() {
        let (state, author) = setup_test_state().await;
        let created = state
            .acronyms
            .create(AcronymData {
                short: "BRB".to_string(),
                long: "be right back".to_string(),
                user_id: author.id,
            })
            .await
            .unwrap();

        let redirect = edit_submit(
            State(state.clone()),
            Path(created.id.to_string()),
            form("BRB", "buy raisin bread", author.id),
        )
        .await
        .unwrap();
        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/acronyms/{}", created.id));

        let stored = state.acronyms.get(created.id).await.unwrap();
        assert_eq!(stored.long, "buy raisin bread");
    }

    #[tokio::test]
    async fn test_delete_redirects_home() {
        let (state, author) = setup_test_state().await;
        let created = state
            .acronyms
            .create(AcronymData {
                short: "AFK".to_string(),
                long: "away from keyboard".to_string(),
                user_id: author.id,
            })
            .await
            .unwrap();

        let redirect = delete_submit(State(state.clone()), Path(created.id.to_string()))
            .await
            .unwrap();
        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        assert!(state.acronyms.get(created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_show_with_unparseable_id_is_not_found() {
        let (state, _) = setup_test_state().await;

        let err = show(State(state), Path("not-a-number".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_form_prefills_current_values() {
        let (state, author) = setup_test_state().await;
        let created = state
            .acronyms
            .create(AcronymData {
                short: "FTW".to_string(),
                long: "for the win".to_string(),
                user_id: author.id,
            })
            .await
            .unwrap();

        let Html(document) = edit_form(State(state), Path(created.id.to_string()))
            .await
            .unwrap();
        assert!(document.contains("value=\"FTW\""));
        assert!(document.contains("value=\"for the win\""));
    }
}
