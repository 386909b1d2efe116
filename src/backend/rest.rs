use crate::{
    api::{
        client::Client,
        error::{GetError, StorageError, UpdateError},
        experiment::Experiment,
        results::ExperimentResults,
    },
    ExperimentId, VariantId,
};
use anyhow::{Context, Error};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Display;

#[derive(Deserialize)]
struct RestErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RestError {
    #[error("{status}: {message}")]
    Api { status: u16, message: String },
    #[error("Unknown {status} error:\n{body}")]
    Unknown { status: u16, body: String },
}

impl RestError {
    pub fn status(&self) -> u16 {
        match self {
            RestError::Api { status, .. } => *status,
            RestError::Unknown { status, .. } => *status,
        }
    }
}

pub struct Server {
    api_url: String,
}

fn parse_error(response: ureq::Response) -> RestError {
    let status = response.status();
    let body = response
        .into_string()
        .unwrap_or_else(|_| "Could not turn error body into String.".to_string());

    // Error bodies carry a top-level message; anything else is passed along raw.
    let parsed = serde_json::from_str::<RestErrorBody>(&body).ok();
    if let Some(parsed) = parsed {
        RestError::Api {
            status,
            message: parsed.message,
        }
    } else {
        RestError::Unknown { status, body }
    }
}

impl Server {
    pub fn new(api_url: impl Into<String>) -> Self {
        Server {
            api_url: api_url.into(),
        }
    }

    fn execute<Ep, Val, Hand, Err>(&mut self, request: Ep, error_handler: Hand) -> Result<Val, Err>
    where
        Ep: Endpoint<Value = Val> + EndpointExt,
        Hand: FnOnce(RestError) -> Err,
        Err: From<anyhow::Error>,
    {
        let path = request.path().context("building request path failed")?;
        let url = format!("{}/{}", self.api_url, path);
        let buffer = Ep::write_request_string(&request).context("serializing request failed")?;
        tracing::debug!(url = %url, "issuing request");
        let http_response = Ep::METHOD(&url).send_string(&buffer);
        if http_response.error() {
            let error = parse_error(http_response);
            Err(error_handler(error))
        } else {
            let response_string = http_response
                .into_string()
                .context("failed to turn response into string")?;
            let response = Ep::read_response_string(&response_string)
                .with_context(|| format!("deserializing response failed:\n{}", &response_string))?;
            let value = Ep::extract(response);
            Ok(value)
        }
    }
}

fn not_found<Err>(make: impl FnOnce() -> Err) -> impl FnOnce(RestError) -> Err
where
    Err: From<anyhow::Error>,
{
    |error| {
        if error.status() == 404 {
            make()
        } else {
            Err::from(error.into())
        }
    }
}

impl Client for Server {
    fn list_experiments(&mut self, page_id: &str) -> Result<Vec<Experiment>, StorageError> {
        let request = ListExperiments { page_id };
        self.execute(request, StorageError::from)
    }

    fn get_experiment(&mut self, id: &ExperimentId) -> Result<Experiment, GetError> {
        let request = GetExperiment { experiment_id: id };
        self.execute(
            request,
            not_found(|| GetError::DoesNotExist(id.as_ref().to_string())),
        )
    }

    fn get_results(&mut self, id: &ExperimentId) -> Result<ExperimentResults, GetError> {
        let request = GetResults { experiment_id: id };
        self.execute(
            request,
            not_found(|| GetError::DoesNotExist(id.as_ref().to_string())),
        )
    }

    fn promote_variant(
        &mut self,
        experiment: &ExperimentId,
        variant: &VariantId,
    ) -> Result<Experiment, UpdateError> {
        let request = PromoteVariant {
            experiment_id: experiment,
            variant_id: variant,
        };
        self.execute(
            request,
            not_found(|| UpdateError::DoesNotExist(variant.as_ref().to_string())),
        )
    }

    fn archive_experiment(&mut self, id: &ExperimentId) -> Result<Experiment, UpdateError> {
        let request = ArchiveExperiment { experiment_id: id };
        self.execute(
            request,
            not_found(|| UpdateError::DoesNotExist(id.as_ref().to_string())),
        )
    }
}

trait Endpoint {
    const METHOD: fn(&str) -> ureq::Request;

    type Response;
    type Value;

    fn path(&self) -> Result<String, Error>;
    fn extract(response: Self::Response) -> Self::Value;
}
trait EndpointExt: Endpoint {
    fn read_response_string(response: &str) -> Result<Self::Response, Error>;
    fn write_request_string(request: &Self) -> Result<String, Error>;
}
impl<P, R, V> EndpointExt for P
where
    P: Serialize,
    R: DeserializeOwned,
    P: Endpoint<Response = R, Value = V>,
{
    fn read_response_string(response: &str) -> Result<Self::Response, Error> {
        let response = serde_json::from_str::<'_, R>(response)?;
        Ok(response)
    }

    fn write_request_string(request: &Self) -> Result<String, Error> {
        Ok(serde_json::to_string(request)?)
    }
}

fn fmt_path(segments: &[&dyn Display]) -> String {
    let mut path = String::from("experiments");
    for segment in segments {
        path.push('/');
        path.push_str(&segment.to_string());
    }
    path
}

#[derive(Debug, Clone, Copy, Serialize)]
struct ListExperiments<'a> {
    #[serde(skip)]
    pub page_id: &'a str,
}
#[derive(Deserialize)]
struct ListExperimentsResponse {
    entity: Vec<Experiment>,
}
impl Endpoint for ListExperiments<'_> {
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    type Response = ListExperimentsResponse;
    type Value = Vec<Experiment>;

    fn path(&self) -> Result<String, Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query<'a> {
            page_id: &'a str,
        }
        let query = serde_qs::to_string(&Query {
            page_id: self.page_id,
        })
        .context("building query string failed")?;
        Ok(format!("experiments?{}", query))
    }

    fn extract(response: Self::Response) -> Self::Value {
        response.entity
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GetExperiment<'a> {
    #[serde(skip)]
    pub experiment_id: &'a ExperimentId,
}
#[derive(Deserialize)]
struct ExperimentResponse {
    entity: Experiment,
}
impl Endpoint for GetExperiment<'_> {
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    type Response = ExperimentResponse;
    type Value = Experiment;

    fn path(&self) -> Result<String, Error> {
        Ok(fmt_path(&[&self.experiment_id.as_ref()]))
    }

    fn extract(response: Self::Response) -> Self::Value {
        response.entity
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GetResults<'a> {
    #[serde(skip)]
    pub experiment_id: &'a ExperimentId,
}
#[derive(Deserialize)]
struct GetResultsResponse {
    entity: ExperimentResults,
}
impl Endpoint for GetResults<'_> {
    const METHOD: fn(&str) -> ureq::Request = ureq::get;
    type Response = GetResultsResponse;
    type Value = ExperimentResults;

    fn path(&self) -> Result<String, Error> {
        Ok(fmt_path(&[&self.experiment_id.as_ref(), &"results"]))
    }

    fn extract(response: Self::Response) -> Self::Value {
        response.entity
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct PromoteVariant<'a> {
    #[serde(skip)]
    pub experiment_id: &'a ExperimentId,
    #[serde(skip)]
    pub variant_id: &'a VariantId,
}
impl Endpoint for PromoteVariant<'_> {
    const METHOD: fn(&str) -> ureq::Request = ureq::put;
    type Response = ExperimentResponse;
    type Value = Experiment;

    fn path(&self) -> Result<String, Error> {
        Ok(fmt_path(&[
            &self.experiment_id.as_ref(),
            &"variants",
            &self.variant_id.as_ref(),
            &"_promote",
        ]))
    }

    fn extract(response: Self::Response) -> Self::Value {
        response.entity
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct ArchiveExperiment<'a> {
    #[serde(skip)]
    pub experiment_id: &'a ExperimentId,
}
impl Endpoint for ArchiveExperiment<'_> {
    const METHOD: fn(&str) -> ureq::Request = ureq::put;
    type Response = ExperimentResponse;
    type Value = Experiment;

    fn path(&self) -> Result<String, Error> {
        Ok(fmt_path(&[&self.experiment_id.as_ref(), &"_archive"]))
    }

    fn extract(response: Self::Response) -> Self::Value {
        response.entity
    }
}
