use std::convert::Infallible;
use std::future::Future;

use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use super::handler::CookieRoutes;

pub struct CookieSvc {
    listen: String,
    routes: CookieRoutes,
}

impl CookieSvc {
    pub fn new(listen: impl Into<String>, routes: CookieRoutes) -> Self {
        Self {
            listen: listen.into(),
            routes,
        }
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let listener = TcpListener::bind(&self.listen).await?;
        tracing::info!("cookie service listening on {}", self.listen);
        serve(listener, self.routes.clone(), shutdown).await;
        Ok(())
    }
}

/// Accept loop. One task per connection, HTTP/1 only.
pub async fn serve<F>(listener: TcpListener, routes: CookieRoutes, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("cookie service shutdown");
                return;
            }
            res = listener.accept() => {
                let (stream, peer) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::warn!("accept error: {}", e);
                        continue;
                    }
                };

                let routes = routes.clone();
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let svc = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                        let resp = routes.handle(&req);
                        async move { Ok::<_, Infallible>(resp) }
                    });

                    let builder = hyper::server::conn::http1::Builder::new();
                    if let Err(e) = builder.serve_connection(io, svc).await {
                        tracing::warn!(%peer, "conn error: {}", e);
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CookieConfig;
    use crate::cookies::CookieReader;
    use crate::encoding::encode_base64;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn serves_cookie_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = CookieRoutes::new(CookieReader::new(&CookieConfig {
            cookie_name: "myNeatApp".to_string(),
        }));

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, routes, async move {
            let _ = rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let req = format!(
            "GET /cookies/myStuff HTTP/1.1\r\nHost: localhost\r\nCookie: myStuff=\"{}\";\r\nConnection: close\r\n\r\n",
            encode_base64(r#"{"my":["data","here"]}"#)
        );
        stream.write_all(req.as_bytes()).await.unwrap();

        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200 OK"), "{raw}");
        assert!(raw.ends_with(r#"{"my":["data","here"]}"#), "{raw}");

        tx.send(()).unwrap();
        server.await.unwrap();
    }
}
