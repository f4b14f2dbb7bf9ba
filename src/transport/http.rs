//! HTTP implementation of [`Transport`] against the room server.

use crate::common::{Side, Square};
use crate::config::HTTP_REQUEST_TIMEOUT;
use crate::protocol::{
    CreateResponse, JoinResponse, MoveRequest, MoveResponse, MovesResponse, StateResponse,
};
use crate::transport::Transport;

pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    /// Connect to a server at `base`, e.g. `http://127.0.0.1:5000`.
    ///
    /// Every request carries a coarse overall timeout; the finer per-call
    /// budgets live in the move client.
    pub fn new(base: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpTransport {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn create_room(&self) -> anyhow::Result<CreateResponse> {
        let resp = self.client.post(self.url("create")).send().await?;
        Ok(resp.json().await?)
    }

    async fn join_room(&self, room: &str) -> anyhow::Result<JoinResponse> {
        // The server answers rejections (full or unknown room) with a JSON
        // body on a non-2xx status, so parse the body regardless of status.
        let resp = self
            .client
            .post(self.url("join"))
            .query(&[("room", room)])
            .send()
            .await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_state(&self, room: &str) -> anyhow::Result<StateResponse> {
        let resp = self
            .client
            .get(self.url("state"))
            .query(&[("room", room)])
            .send()
            .await?;
        Ok(resp.error_for_status()?.json().await?)
    }

    async fn fetch_moves(&self, room: &str, origin: Square) -> anyhow::Result<MovesResponse> {
        let resp = self
            .client
            .get(self.url("moves"))
            .query(&[
                ("row", origin.row.to_string()),
                ("col", origin.col.to_string()),
                ("room", room.to_string()),
            ])
            .send()
            .await?;
        Ok(resp.error_for_status()?.json().await?)
    }

    async fn submit_move(&self, req: &MoveRequest) -> anyhow::Result<MoveResponse> {
        let resp = self
            .client
            .post(self.url("move"))
            .json(req)
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    async fn leave(&self, room: &str, side: Side) {
        // Fire and forget: the notice must be able to outlive the caller,
        // and a failure here is of no consequence.
        let request = self
            .client
            .post(self.url("leave"))
            .query(&[("room", room), ("side", side.as_str())]);
        tokio::spawn(async move {
            let _ = request.send().await;
        });
    }
}
