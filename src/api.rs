//! Client for the iLovePDF compression workflow.
//!
//! The remote contract is a short sequential chain: authenticate for a
//! bearer token, start a task to get a working server and task id,
//! upload each file, trigger processing, download the result, delete
//! the task. No retries; every failure names the stage it came from.

use crate::constants::{
    CompressionLevel, API_START_SERVER, API_VERSION, OUTPUT_FILENAME_TEMPLATE, PACKAGED_FILENAME,
    TOOL_COMPRESS,
};
use crate::error::{Result, SqueezeError};
use crate::{verbose, warn};
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    server: String,
    task: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    server_filename: String,
}

#[derive(Debug, Deserialize)]
struct QuotaResponse {
    remaining_files: u64,
}

/// Post-process response of the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessResponse {
    pub timer: String,
    pub status: String,
    pub download_filename: String,
    pub filesize: u64,
    pub output_filesize: u64,
    pub output_filenumber: usize,
    #[serde(default)]
    pub output_extensions: Vec<String>,
}

/// Outcome of the process call. In debug mode the server echoes the
/// parameters it received instead of executing compression.
#[derive(Debug)]
pub enum ProcessOutcome {
    Executed(ProcessResponse),
    DebugEcho(Value),
}

/// Task lifecycle. The server-assigned task id is immutable once the
/// task reaches `Started`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Created,
    Authenticated,
    Started,
    FilesUploaded,
    Processed,
    Downloaded,
    Applied,
    Failed,
}

/// Authenticated HTTP client against the iLovePDF REST API.
#[derive(Debug, Clone)]
pub struct CompressionClient {
    http: Client,
    public_key: String,
    token: Option<String>,
    debug: bool,
}

impl CompressionClient {
    pub fn new(public_key: impl Into<String>, debug: bool) -> Self {
        Self {
            http: Client::new(),
            public_key: public_key.into(),
            token: None,
            debug,
        }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn endpoint(server: &str, path: &str) -> String {
        format!("https://{server}/{API_VERSION}/{path}")
    }

    fn auth_payload(&self) -> Vec<(&str, &str)> {
        let mut payload = vec![("public_key", self.public_key.as_str())];
        if self.debug {
            payload.push(("debug", "true"));
        }
        payload
    }

    fn bearer(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| SqueezeError::Auth("client is not authenticated yet".to_string()))
    }

    /// Exchange the public key for a short-lived bearer token.
    pub async fn authenticate(&mut self) -> Result<()> {
        let url = Self::endpoint(API_START_SERVER, "auth");
        let payload = self.auth_payload();

        let response = self
            .http
            .post(&url)
            .form(&payload)
            .send()
            .await
            .map_err(|e| SqueezeError::Auth(format!("auth request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SqueezeError::Auth(format!(
                "server rejected the API key (status {status}): {body}"
            )));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| SqueezeError::Auth(format!("invalid auth response: {e}")))?;
        self.token = Some(auth.token);
        verbose!("Authenticated with the iLovePDF API");

        Ok(())
    }

    /// Remaining file operations in the current billing cycle.
    pub async fn get_quota(&self) -> Result<u64> {
        let url = Self::endpoint(API_START_SERVER, "info");
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let response = check_status(response).await?;
        let quota: QuotaResponse = response.json().await?;

        Ok(quota.remaining_files)
    }

    /// Request a task slot. The server assigns a working server that
    /// handles all further calls for this task.
    pub async fn start_task(&self, level: CompressionLevel) -> Result<CompressTask> {
        let url = Self::endpoint(API_START_SERVER, &format!("start/{TOOL_COMPRESS}"));
        let request = with_debug(self.http.get(&url), self.debug);
        let response = request.bearer_auth(self.bearer()?).send().await?;
        let response = check_status(response).await?;
        let start: StartResponse = response.json().await?;
        verbose!(
            "Task {} assigned to working server {}",
            start.task,
            start.server
        );

        Ok(CompressTask {
            client: self.clone(),
            task_id: start.task,
            working_server: start.server,
            files: Vec::new(),
            level,
            state: TaskState::Started,
            process_response: None,
        })
    }
}

/// One remote compression job: a batch of files bound to a
/// server-assigned task id.
#[derive(Debug)]
pub struct CompressTask {
    client: CompressionClient,
    task_id: String,
    working_server: String,
    /// Local path mapped to its server filename, in upload order.
    files: Vec<(PathBuf, String)>,
    level: CompressionLevel,
    state: TaskState,
    process_response: Option<ProcessResponse>,
}

impl CompressTask {
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn endpoint(&self, path: &str) -> String {
        CompressionClient::endpoint(&self.working_server, path)
    }

    /// Queue a local file for upload.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            self.state = TaskState::Failed;
            return Err(SqueezeError::FileNotFound(path.to_path_buf()));
        }
        if self.files.iter().any(|(p, _)| p == path) {
            warn!("File {:?} was already added to this task", path);
        }
        self.files.push((path.to_path_buf(), String::new()));

        Ok(())
    }

    /// Upload each queued file sequentially to the working server.
    pub async fn upload(&mut self) -> Result<()> {
        let token = self.client.bearer()?.to_string();
        let url = self.endpoint("upload");

        for (path, server_filename) in &mut self.files {
            let upload = upload_one(
                &self.client.http,
                &url,
                &token,
                &self.task_id,
                path,
                self.client.debug,
            )
            .await;

            match upload {
                Ok(response) => *server_filename = response.server_filename,
                Err(e) => {
                    self.state = TaskState::Failed;
                    return Err(SqueezeError::Upload {
                        file: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.state = TaskState::FilesUploaded;
        Ok(())
    }

    /// Trigger server-side compression of the uploaded files.
    ///
    /// In debug mode the server does not execute anything and only
    /// echoes the parameters it received; no quota is consumed.
    pub async fn process(&mut self) -> Result<ProcessOutcome> {
        let params = process_params(&self.task_id, self.level, &self.files, self.client.debug);
        let url = self.endpoint("process");

        let response = self
            .http()
            .post(&url)
            .bearer_auth(self.client.bearer()?)
            .form(&params)
            .send()
            .await?;
        let response = check_status(response).await?;

        if self.client.debug {
            let echo: Value = response.json().await?;
            return Ok(ProcessOutcome::DebugEcho(echo));
        }

        let processed: ProcessResponse = response.json().await?;
        if processed.output_filenumber != self.files.len() {
            self.state = TaskState::Failed;
            return Err(SqueezeError::FileCountMismatch {
                uploaded: self.files.len(),
                produced: processed.output_filenumber,
            });
        }

        self.process_response = Some(processed.clone());
        self.state = TaskState::Processed;

        Ok(ProcessOutcome::Executed(processed))
    }

    /// Download the result into `dir` and return the written path.
    /// A single-file task yields a PDF, a multi-file task a ZIP archive.
    pub async fn download(&mut self, dir: &Path) -> Result<PathBuf> {
        let processed = self
            .process_response
            .as_ref()
            .ok_or(SqueezeError::NothingToDownload)?;

        let url = self.endpoint(&format!("download/{}", self.task_id));
        let request = with_debug(self.http().get(&url), self.client.debug);
        let response = request
            .bearer_auth(self.client.bearer()?)
            .send()
            .await
            .map_err(|e| SqueezeError::Download(format!("download request failed: {e}")))?;
        let response = check_status(response)
            .await
            .map_err(|e| SqueezeError::Download(e.to_string()))?;
        let bytes = response.bytes().await?;

        // download_filename may contain subdirectories
        let target = dir.join(&processed.download_filename);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &bytes)?;
        self.state = TaskState::Downloaded;

        Ok(target)
    }

    /// Remove the task from the iLovePDF servers. Best effort cleanup
    /// once results are local.
    pub async fn delete(&mut self) -> Result<()> {
        let url = self.endpoint(&format!("task/{}", self.task_id));
        let request = with_debug(self.http().delete(&url), self.client.debug);
        let response = request.bearer_auth(self.client.bearer()?).send().await?;
        check_status(response).await?;
        self.process_response = None;

        Ok(())
    }

    pub fn mark_applied(&mut self) {
        self.state = TaskState::Applied;
    }

    fn http(&self) -> &Client {
        &self.client.http
    }
}

async fn upload_one(
    http: &Client,
    url: &str,
    token: &str,
    task_id: &str,
    path: &Path,
    debug: bool,
) -> Result<UploadResponse> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file.pdf".to_string());
    let bytes = fs::read(path)?;

    let mut form = multipart::Form::new()
        .text("task", task_id.to_string())
        .part("file", multipart::Part::bytes(bytes).file_name(file_name));
    if debug {
        form = form.text("debug", "true");
    }

    let response = http
        .post(url)
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?;
    let response = check_status(response).await?;

    Ok(response.json().await?)
}

/// Form payload of the process call. Files are indexed in upload order
/// so the server output matches the sorted input list.
fn process_params(
    task_id: &str,
    level: CompressionLevel,
    files: &[(PathBuf, String)],
    debug: bool,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("task".to_string(), task_id.to_string()),
        ("tool".to_string(), TOOL_COMPRESS.to_string()),
        ("compression_level".to_string(), level.as_str().to_string()),
        ("ignore_password".to_string(), "true".to_string()),
        (
            "output_filename".to_string(),
            OUTPUT_FILENAME_TEMPLATE.to_string(),
        ),
        (
            "packaged_filename".to_string(),
            PACKAGED_FILENAME.to_string(),
        ),
    ];

    for (idx, (path, server_filename)) in files.iter().enumerate() {
        params.push((
            format!("files[{idx}][filename]"),
            path.display().to_string(),
        ));
        params.push((
            format!("files[{idx}][server_filename]"),
            server_filename.clone(),
        ));
        params.push((format!("files[{idx}][password]"), String::new()));
    }

    if debug {
        params.push(("debug".to_string(), "true".to_string()));
    }

    params
}

/// Every request of a debug run carries debug=true; bodyless requests
/// carry it in the query string.
fn with_debug(builder: reqwest::RequestBuilder, debug: bool) -> reqwest::RequestBuilder {
    if debug {
        builder.query(&[("debug", "true")])
    } else {
        builder
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(SqueezeError::Server {
        url,
        status: status.as_u16(),
        body,
    })
}

/// Fetch the remaining quota, driving the async client from sync code.
pub fn fetch_quota_sync(public_key: &str) -> Result<u64> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| SqueezeError::Runtime(format!("failed to create runtime: {e}")))?;

    runtime.block_on(async {
        let mut client = CompressionClient::new(public_key, false);
        client.authenticate().await?;
        client.get_quota().await
    })
}
