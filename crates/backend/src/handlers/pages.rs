use axum::Json;
use contracts::pages::PageView;
use contracts::system::auth::Role;

use crate::pages;
use crate::system::auth::extractor::MaybeUser;

// Page endpoints are anonymous-friendly: the role comes from the bearer
// token when one is present, and the visibility policy handles the rest.

fn role_of(user: &MaybeUser) -> Option<Role> {
    user.0.as_ref().map(|claims| claims.role)
}

pub async fn dashboard(user: MaybeUser) -> Json<PageView> {
    Json(pages::dashboard::load(role_of(&user)).await)
}

pub async fn inventory(user: MaybeUser) -> Json<PageView> {
    Json(pages::inventory::load(role_of(&user)).await)
}

pub async fn sales(user: MaybeUser) -> Json<PageView> {
    Json(pages::sales::load(role_of(&user)).await)
}

pub async fn purchase(user: MaybeUser) -> Json<PageView> {
    Json(pages::purchase::load(role_of(&user)).await)
}

pub async fn reports(user: MaybeUser) -> Json<PageView> {
    Json(pages::reports::load(role_of(&user)).await)
}
