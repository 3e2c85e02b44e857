//! Browser fetch via `gloo-net`.

use gloo_net::http::{Method as GlooMethod, RequestBuilder};

use super::{Body, FetchResponse, Method, MultipartForm, RequestOptions, Transport};
use crate::error::FetchError;

/// Sends requests with `window.fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, url: &str, opts: &RequestOptions) -> Result<FetchResponse, FetchError> {
        let mut builder = RequestBuilder::new(url).method(gloo_method(opts.method));
        for (name, value) in opts.headers.iter() {
            builder = builder.header(name, value);
        }
        let request = match &opts.body {
            None => builder.build(),
            Some(Body::Text(text)) => builder.body(text.as_str()),
            Some(Body::Multipart(form)) => builder.body(form_data(form)?),
        }
        .map_err(|e| FetchError::Build(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(FetchResponse { status, body })
    }
}

fn gloo_method(method: Method) -> GlooMethod {
    match method {
        Method::Get => GlooMethod::GET,
        Method::Post => GlooMethod::POST,
        Method::Put => GlooMethod::PUT,
        Method::Patch => GlooMethod::PATCH,
        Method::Delete => GlooMethod::DELETE,
    }
}

fn form_data(form: &MultipartForm) -> Result<web_sys::FormData, FetchError> {
    let data = web_sys::FormData::new().map_err(|e| FetchError::Build(format!("{e:?}")))?;
    for (name, value) in form.fields() {
        data.append_with_str(name, value)
            .map_err(|e| FetchError::Build(format!("{e:?}")))?;
    }
    Ok(data)
}
