use std::io::Write;

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

use crate::response::{Render, ResponseDecoder};
use crate::token::TokenManager;

/// Repeats ensure-token → fetch → render `count` times against one URL.
///
/// The token lives here, between iterations, never inside the manager.
pub struct RequestLoop<'a> {
    pub manager: &'a TokenManager,
    pub decoder: &'a ResponseDecoder,
    pub url: &'a str,
}

impl RequestLoop<'_> {
    /// Writes one render per iteration to `out` and returns how many
    /// responses were rendered. The first hard failure stops the loop.
    pub async fn run<W: Write>(&self, count: u32, out: &mut W) -> Result<u32> {
        if count == 0 {
            bail!("count must be at least 1");
        }

        let mut token = String::new();
        let mut rendered = 0;
        for i in 1..=count {
            token = self
                .manager
                .ensure_token(&token)
                .await
                .context("error making login request")?;

            let response = self
                .decoder
                .fetch_and_decode(self.url, &token)
                .await
                .context("error making request")?;

            match response {
                Some(response) => {
                    writeln!(out, "{}", response.render())?;
                    rendered += 1;
                    info!(iteration = i, page = response.page(), "response rendered");
                }
                None => warn!(iteration = i, "nothing to render"),
            }
        }
        Ok(rendered)
    }
}

/// Report a fatal error exactly once: through tracing when a subscriber is
/// installed, otherwise straight to `stderr`.
pub fn report_failure<W: Write>(err: &anyhow::Error, logging_ready: bool, stderr: &mut W) {
    if logging_ready {
        error!("{:#}", err);
    } else {
        let _ = writeln!(stderr, "{:#}", err);
    }
}
