//! GraphQL documents sent to Linear.

macro_rules! issue_fields {
    () => {
        "id identifier title description priority url createdAt updatedAt dueDate \
         state { id name type color } \
         assignee { id name displayName email avatarUrl active } \
         team { id key name } \
         project { id name } \
         labels { nodes { id name color } }"
    };
}

macro_rules! user_fields {
    () => {
        "id name displayName email avatarUrl active createdAt updatedAt"
    };
}

macro_rules! project_fields {
    () => {
        "id name description slugId createdAt updatedAt"
    };
}

pub(crate) const CREATE_ISSUE: &str = concat!(
    "mutation IssueCreate($input: IssueCreateInput!) { issueCreate(input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

pub(crate) const UPDATE_ISSUE: &str = concat!(
    "mutation IssueUpdate($id: String!, $input: IssueUpdateInput!) { issueUpdate(id: $id, input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

pub(crate) const DELETE_ISSUE: &str =
    "mutation IssueDelete($id: String!) { issueDelete(id: $id) { success } }";

pub(crate) const GET_ISSUE: &str = concat!(
    "query Issue($id: String!) { issue(id: $id) { ",
    issue_fields!(),
    " } }"
);

pub(crate) const LIST_ISSUES: &str = concat!(
    "query Issues($first: Int!, $filter: IssueFilter) { issues(first: $first, filter: $filter) { nodes { ",
    issue_fields!(),
    " } } }"
);

pub(crate) const WORKFLOW_STATES: &str = "query WorkflowStates($filter: WorkflowStateFilter) { workflowStates(first: 50, filter: $filter) { nodes { id name type } } }";

pub(crate) const ISSUE_LABELS: &str = "query IssueLabels($filter: IssueLabelFilter) { issueLabels(first: 250, filter: $filter) { nodes { id name } } }";

pub(crate) const LIST_PROJECTS: &str = concat!(
    "query Projects($first: Int!) { projects(first: $first) { nodes { ",
    project_fields!(),
    " } } }"
);

pub(crate) const GET_PROJECT: &str = concat!(
    "query Project($id: String!) { project(id: $id) { ",
    project_fields!(),
    " } }"
);

pub(crate) const VIEWER: &str = concat!("query Viewer { viewer { ", user_fields!(), " } }");

pub(crate) const SEARCH_USERS: &str = concat!(
    "query Users($first: Int!, $filter: UserFilter) { users(first: $first, filter: $filter) { nodes { ",
    user_fields!(),
    " } } }"
);
