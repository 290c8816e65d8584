use std::path::{Component, Path, PathBuf};

use actix_web::{
    http::{header, Method},
    web, HttpRequest, HttpResponse,
};

use crate::configuration::Environment;

const ENTRY_DOCUMENT: &str = "index.html";

/// Where the frontend bundle lives and how it should be cached.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    pub root: PathBuf,
    pub environment: Environment,
}

impl StaticAssets {
    /// Maps a percent-encoded request path onto a file under `root`. Anything
    /// that tries to climb out of it resolves to `None`.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let mut resolved = self.root.clone();

        for raw_segment in request_path.split('/').filter(|s| !s.is_empty()) {
            let segment = urlencoding::decode(raw_segment).ok()?;
            if segment.contains(['/', '\\', '\0']) {
                return None;
            }

            for component in Path::new(segment.as_ref()).components() {
                match component {
                    Component::Normal(part) => resolved.push(part),
                    Component::CurDir => {}
                    _ => return None,
                }
            }
        }

        Some(resolved)
    }

    fn cache_control(&self, relative_path: &str) -> &'static str {
        match self.environment {
            Environment::Production if relative_path.starts_with("assets/") => {
                "public, max-age=31536000, immutable"
            }
            _ => "no-cache",
        }
    }
}

/// Serves the frontend bundle. Unknown paths get the entry document so
/// client-side routing keeps working.
#[tracing::instrument(name = "Serving frontend asset", skip(req, assets), fields(path = %req.path()))]
pub async fn spa(req: HttpRequest, assets: web::Data<StaticAssets>) -> HttpResponse {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return HttpResponse::MethodNotAllowed().finish();
    }

    let relative_path = req.path().trim_start_matches('/');
    let candidate = assets
        .resolve(relative_path)
        .filter(|_| !relative_path.is_empty());

    if let Some(path) = candidate {
        if is_file(&path).await {
            return serve_file(&path, assets.cache_control(relative_path)).await;
        }
    }

    serve_file(&assets.root.join(ENTRY_DOCUMENT), "no-cache").await
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

async fn serve_file(path: &Path, cache_control: &'static str) -> HttpResponse {
    match tokio::fs::read(path).await {
        Ok(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, mime.as_ref()))
                .insert_header((header::CACHE_CONTROL, cache_control))
                .body(content)
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "Failed to read frontend file");
            HttpResponse::NotFound().finish()
        }
    }
}
