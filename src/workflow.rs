//! GitHub Actions workflow mirroring a repository to Gitlab

/// Where the workflow goes in the GitHub repository
pub const WORKFLOW_FILE: &str = ".github/workflows/mirror-to-gitlab.yml";

/// Placeholder replaced by the Gitlab host
const HOST_PLACEHOLDER: &str = "@HOST@";

/// Workflow template
const WORKFLOW_TEMPLATE: &str = r#"name: Mirror to GitLab
on:
  push:
    branches: ["**"]
    tags: ["*"]

jobs:
  mirror:
    runs-on: ubuntu-latest
    permissions:
      contents: read
    steps:
      - name: Checkout full history
        uses: actions/checkout@v4
        with:
          fetch-depth: 0

      - name: Start SSH agent and add deploy key
        uses: webfactory/ssh-agent@v0.9.0
        with:
          ssh-private-key: ${{ secrets.MIRROR_SSH_KEY }}

      - name: Trust @HOST@ host
        run: |
          mkdir -p ~/.ssh
          ssh-keyscan -t rsa,ed25519 @HOST@ >> ~/.ssh/known_hosts

      - name: Configure Git safe.directory
        run: git config --global --add safe.directory "$GITHUB_WORKSPACE"

      - name: Fetch all branches/tags
        run: |
          git fetch --prune --tags origin

      - name: Push mirror to GitLab (heads/tags/notes only)
        env:
          MIRROR_URL: ${{ secrets.MIRROR_URL }}
        run: |
          git remote remove mirror 2>/dev/null || true
          git remote add mirror "$MIRROR_URL"
          git push --prune mirror +refs/heads/*:refs/heads/* +refs/tags/*:refs/tags/*
          git push --prune mirror +refs/notes/*:refs/notes/* || true
"#;

/// Render the workflow for the Gitlab `host`
pub fn render_workflow(host: &str) -> String {
    WORKFLOW_TEMPLATE.replace(HOST_PLACEHOLDER, host)
}
