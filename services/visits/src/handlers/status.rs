/// Handler for `GET /`.
pub async fn banner() -> &'static str {
    "MagicBank Visitas Backend OK"
}
