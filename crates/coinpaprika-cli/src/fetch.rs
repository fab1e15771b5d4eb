/*
[INPUT]:  Fetch command arguments and client configuration
[OUTPUT]: Decoded payload rendered as JSON
[POS]:    Command layer - one request through the callback pipeline
[UPDATE]: When adding models or request options to the fetch command
*/

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use coinpaprika_api::{
    BodyEncoding, CachePolicy, CallbackQueue, Ico, Method, Model, News, ParamValue, Params,
    Request, Transport, Tweet,
};
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::config::CliConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Get,
    Post,
    Put,
    Delete,
}

impl From<MethodArg> for Method {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => Method::Get,
            MethodArg::Post => Method::Post,
            MethodArg::Put => Method::Put,
            MethodArg::Delete => Method::Delete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    Json,
    Urlencode,
}

impl From<EncodingArg> for BodyEncoding {
    fn from(encoding: EncodingArg) -> Self {
        match encoding {
            EncodingArg::Json => BodyEncoding::Json,
            EncodingArg::Urlencode => BodyEncoding::UrlEncode,
        }
    }
}

/// Payload shape the response is decoded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelKind {
    /// Any JSON
    Raw,
    News,
    Tweets,
    Icos,
}

/// Arguments of the `fetch` command
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Endpoint path relative to the base URL, e.g. coins/btc-bitcoin/twitter
    pub path: String,
    #[arg(long, value_enum, default_value_t = MethodArg::Get)]
    pub method: MethodArg,
    /// Request parameter as key=value; repeatable
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, ParamValue)>,
    #[arg(long, value_enum, default_value_t = EncodingArg::Json)]
    pub encoding: EncodingArg,
    #[arg(long, value_enum, default_value_t = ModelKind::Raw)]
    pub model: ModelKind,
    /// Ask caches along the way to revalidate
    #[arg(long)]
    pub reload: bool,
}

/// Parse `key=value`, typing the value as bool, integer, float or string
pub fn parse_param(raw: &str) -> std::result::Result<(String, ParamValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{raw}`"));
    }
    Ok((key.to_string(), parse_param_value(value)))
}

fn parse_param_value(value: &str) -> ParamValue {
    if let Ok(flag) = value.parse::<bool>() {
        return ParamValue::Bool(flag);
    }
    if let Ok(number) = value.parse::<i64>() {
        return ParamValue::Int(number);
    }
    if let Ok(number) = value.parse::<u64>() {
        return ParamValue::UInt(number);
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => ParamValue::Float(number),
        _ => ParamValue::String(value.to_string()),
    }
}

/// Perform the request described by `args` and return the decoded payload as JSON
pub async fn run_fetch(config: &CliConfig, transport: &Transport, args: &FetchArgs) -> Result<serde_json::Value> {
    match args.model {
        ModelKind::Raw => fetch_model::<serde_json::Value>(config, transport, args).await,
        ModelKind::News => fetch_model::<Vec<News>>(config, transport, args).await,
        ModelKind::Tweets => fetch_model::<Vec<Tweet>>(config, transport, args).await,
        ModelKind::Icos => fetch_model::<Vec<Ico>>(config, transport, args).await,
    }
}

async fn fetch_model<M>(config: &CliConfig, transport: &Transport, args: &FetchArgs) -> Result<serde_json::Value>
where
    M: Model + Serialize,
{
    let request = build_request::<M>(config, args)?;
    info!(request = %request, "performing request");

    let (queue, mut runner) = CallbackQueue::new();
    let (tx, rx) = oneshot::channel();
    let cache_policy = args.reload.then_some(CachePolicy::ReloadIgnoringCacheData);

    request.perform(transport, Some(Arc::new(queue)), cache_policy, move |response| {
        let _ = tx.send(response);
    });

    if !runner.run_one().await {
        return Err(anyhow!("callback queue closed before the response arrived"));
    }
    let response = rx.await.context("response callback dropped")?;
    let value = response
        .into_result()
        .with_context(|| format!("{} {} failed", Method::from(args.method).as_str(), args.path))?;

    debug!("response decoded");
    serde_json::to_value(value).context("render payload as json")
}

fn build_request<M: Model>(config: &CliConfig, args: &FetchArgs) -> Result<Request<M>> {
    let params: Option<Params> = if args.params.is_empty() {
        None
    } else {
        Some(args.params.iter().cloned().collect())
    };

    let mut request = Request::<M>::new(config.base_url()?, args.method.into(), args.path.clone(), params)
        .with_user_agent(config.user_agent.clone())
        .with_body_encoding(args.encoding.into());
    if let Some(token) = &config.token {
        request = request.with_authorization_token(token.clone());
    }
    Ok(request)
}
