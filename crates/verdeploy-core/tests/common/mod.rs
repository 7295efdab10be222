//! Recording fakes for the process runner and the GitHub API

#![allow(dead_code)]

use std::future::Future;
use std::sync::Mutex;

use verdeploy_core::event::{EventPayload, TriggerSource};
use verdeploy_core::http::CommitDetails;
use verdeploy_core::process::{CommandSpec, ProcessOutput};
use verdeploy_core::traits::{CommandRunner, RepositoryApi};
use verdeploy_core::{Error, RepoSlug, Result};

type Responder = Box<dyn Fn(&CommandSpec) -> Result<ProcessOutput> + Send + Sync>;

/// Runner that records every command and answers from a closure
pub struct ScriptedRunner {
    respond: Responder,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&CommandSpec) -> Result<ProcessOutput> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command succeeds; deploy prints `deploy_stdout`
    pub fn deploying(deploy_stdout: &str) -> Self {
        let stdout = deploy_stdout.to_string();
        Self::new(move |cmd| {
            if is_deploy(cmd) {
                Ok(stdout_output(&stdout))
            } else {
                Ok(ProcessOutput::default())
            }
        })
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: fn(&CommandSpec) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(
        &'a self,
        command: &'a CommandSpec,
    ) -> impl Future<Output = Result<ProcessOutput>> + Send + 'a {
        self.calls.lock().unwrap().push(command.clone());
        let result = (self.respond)(command);
        async move { result }
    }
}

pub fn stdout_output(stdout: &str) -> ProcessOutput {
    ProcessOutput {
        stdout: stdout.to_string(),
        stderr: String::new(),
        status: 0,
    }
}

pub fn is_install(cmd: &CommandSpec) -> bool {
    cmd.args == ["yarn"]
}

pub fn is_build(cmd: &CommandSpec) -> bool {
    cmd.args == ["yarn", "build"]
}

pub fn is_alias(cmd: &CommandSpec) -> bool {
    cmd.args.first().map(String::as_str) == Some("vercel") && cmd.args.iter().any(|a| a == "alias")
}

pub fn is_deploy(cmd: &CommandSpec) -> bool {
    cmd.args.first().map(String::as_str) == Some("vercel") && !is_alias(cmd)
}

/// GitHub API fake recording every call
#[derive(Default)]
pub struct RecordingApi {
    pub commit_lookups: Mutex<Vec<String>>,
    pub commit_comments: Mutex<Vec<(String, String)>>,
    pub issue_comments: Mutex<Vec<(u64, String)>>,
    pub fail_comments: bool,
}

impl RecordingApi {
    pub fn failing_comments() -> Self {
        Self {
            fail_comments: true,
            ..Default::default()
        }
    }

    pub fn commit_lookups(&self) -> Vec<String> {
        self.commit_lookups.lock().unwrap().clone()
    }

    pub fn commit_comments(&self) -> Vec<(String, String)> {
        self.commit_comments.lock().unwrap().clone()
    }

    pub fn issue_comments(&self) -> Vec<(u64, String)> {
        self.issue_comments.lock().unwrap().clone()
    }

    fn comment_result(&self) -> Result<()> {
        if self.fail_comments {
            Err(Error::Http("GitHub API returned error: 404 Not Found".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RepositoryApi for RecordingApi {
    fn get_commit<'a>(
        &'a self,
        _repo: &'a RepoSlug,
        sha: &'a str,
    ) -> impl Future<Output = Result<CommitDetails>> + Send + 'a {
        self.commit_lookups.lock().unwrap().push(sha.to_string());
        async move {
            Ok(CommitDetails {
                message: "update docs".to_string(),
                author_name: Some("Pat Author".to_string()),
            })
        }
    }

    fn create_commit_comment<'a>(
        &'a self,
        _repo: &'a RepoSlug,
        sha: &'a str,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        self.commit_comments
            .lock()
            .unwrap()
            .push((sha.to_string(), body.to_string()));
        let result = self.comment_result();
        async move { result }
    }

    fn create_issue_comment<'a>(
        &'a self,
        _repo: &'a RepoSlug,
        issue_number: u64,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        self.issue_comments
            .lock()
            .unwrap()
            .push((issue_number, body.to_string()));
        let result = self.comment_result();
        async move { result }
    }
}

pub fn push_source(branch: &str, sha: &str, message: &str) -> TriggerSource {
    let payload = serde_json::json!({
        "ref": format!("refs/heads/{}", branch),
        "after": sha,
        "repository": {"full_name": "octo/site"},
        "head_commit": {
            "id": sha,
            "message": message,
            "author": {"name": "Octo Cat", "username": "octocat"}
        }
    });
    TriggerSource {
        event_name: "push".to_string(),
        payload: EventPayload::parse(&payload.to_string()).unwrap(),
        repository: Some("octo/site".to_string()),
        git_ref: Some(format!("refs/heads/{}", branch)),
        sha: Some(sha.to_string()),
    }
}

pub fn pull_request_source(number: Option<u64>, head_ref: &str, head_sha: &str) -> TriggerSource {
    let mut payload = serde_json::json!({
        "pull_request": {
            "head": {"ref": head_ref, "sha": head_sha},
            "user": {"login": "contributor"}
        },
        "repository": {"full_name": "octo/site"}
    });
    if let Some(number) = number {
        payload["number"] = serde_json::json!(number);
        payload["pull_request"]["number"] = serde_json::json!(number);
    }
    TriggerSource {
        event_name: "pull_request".to_string(),
        payload: EventPayload::parse(&payload.to_string()).unwrap(),
        repository: Some("octo/site".to_string()),
        git_ref: Some(format!("refs/pull/{}/merge", number.unwrap_or(0))),
        sha: Some("merge000".to_string()),
    }
}
