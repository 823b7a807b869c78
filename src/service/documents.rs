//! GraphQL documents sent by [`super::GitlabService`].
//!
//! Caller input is only ever bound through the declared variables.

pub const ECHO_QUERY: &str = "query ECHO($message: String!) {
  echo(text: $message)
}";

pub const ECHO_MUTATION: &str = "mutation ECHO($message: String!) {
  echoCreate(input: {errors: [], messages: [$message]}) {
    echoes
  }
}";

pub const CREATE_BRANCH: &str = "mutation CREATE_BRANCH($projectPath: ID!, $sourceBranch: String!, $targetBranch: String!) {
  createBranch(input: {projectPath: $projectPath, name: $sourceBranch, ref: $targetBranch}) {
    errors
  }
}";

/// CREATE (only if `$create`) followed by an unconditional UPDATE of the same file.
pub const CREATE_FILE: &str = "mutation CREATE_FILE($projectPath: ID!, $sourceBranch: String!, $createMessage: String!, $updateMessage: String!, $filePath: String!, $fileContent: String!, $create: Boolean!) {
  create: commitCreate(input: {projectPath: $projectPath, branch: $sourceBranch, message: $createMessage, actions: [{action: CREATE, filePath: $filePath}]}) @include(if: $create) {
    errors
  }
  commitCreate(input: {projectPath: $projectPath, branch: $sourceBranch, message: $updateMessage, actions: [{action: UPDATE, filePath: $filePath, content: $fileContent}]}) {
    errors
  }
}";

pub const CREATE_MERGE: &str = "mutation CREATE_MERGE($projectPath: ID!, $sourceBranch: String!, $targetBranch: String!, $commitMessage: String!) {
  mergeRequestCreate(input: {projectPath: $projectPath, title: $commitMessage, sourceBranch: $sourceBranch, targetBranch: $targetBranch}) {
    errors
  }
}";

pub const OPEN_MERGE_REQUESTS: &str = "query OPEN_MERGE_REQUESTS($projectPath: ID!, $sourceBranch: String!) {
  project(fullPath: $projectPath) {
    mergeRequests(state: opened, sourceBranches: [$sourceBranch], first: 1) {
      nodes {
        webUrl
      }
    }
  }
}";
