//! End-to-end HTTP surface tests: a real listener, a real client.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};
    use vb_core::SystemClock;
    use vb_gateway::{build_router, AppState, GatewayConfig};
    use vb_store::MemoryStore;

    /// Bind the gateway on an ephemeral port and return its base URL.
    async fn spawn_gateway() -> String {
        let state = AppState::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock));
        let router = build_router(state, &GatewayConfig::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn voting_round_trip_over_http() {
        let base = spawn_gateway().await;
        let client = reqwest::Client::new();

        // Fresh store: gate defaults off.
        let state: Value = client
            .get(format!("{base}/api/system-state"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(state["votingEnabled"], false);
        assert_eq!(state["emergencyLockdown"], false);

        // Create and unlock a project.
        let project: Value = client
            .post(format!("{base}/api/projects"))
            .json(&json!({ "team_name": "Aurora", "description": "demo" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let id = project["id"].as_u64().unwrap();
        assert_eq!(project["isLocked"], true);

        let unlocked: Value = client
            .patch(format!("{base}/api/projects/{id}/lock"))
            .json(&json!({ "is_locked": false }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(unlocked["isLocked"], false);

        // Voting still disabled.
        let response = client
            .post(format!("{base}/api/projects/{id}/vote"))
            .json(&json!({ "voter_identifier": "agentA" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 403);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["code"], "VOTING_DISABLED");

        // Enable voting and vote.
        let response = client
            .patch(format!("{base}/api/system-state"))
            .json(&json!({ "voting_enabled": true }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let response = client
            .post(format!("{base}/api/projects/{id}/vote"))
            .json(&json!({ "voter_identifier": "agentA" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Vote cast successfully");
        assert_eq!(body["project"]["voteCount"], 1);
        assert_eq!(body["vote"]["voterIdentifier"], "agentA");

        // Same voter again: conflict, tally unchanged.
        let response = client
            .post(format!("{base}/api/projects/{id}/vote"))
            .json(&json!({ "voter_identifier": "agentA" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 409);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["code"], "DUPLICATE_VOTE");

        let stats: Value = client
            .get(format!("{base}/api/admin/stats"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(stats["total_votes"], 1);
        assert_eq!(stats["top_project"]["team_name"], "Aurora");

        // The lock toggle was logged.
        let activity: Value = client
            .get(format!("{base}/api/admin/activity"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let actions: Vec<&str> = activity
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["action"].as_str())
            .collect();
        assert!(actions.contains(&"Project unlocked"));
    }

    #[tokio::test]
    async fn strict_boolean_typing_on_the_gate() {
        let base = spawn_gateway().await;
        let client = reqwest::Client::new();

        let response = client
            .patch(format!("{base}/api/system-state"))
            .json(&json!({ "voting_enabled": "yes" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["code"], "INVALID_TYPE");

        // Null is not a boolean either.
        let response = client
            .patch(format!("{base}/api/system-state"))
            .json(&json!({ "emergency_lockdown": null }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn missing_voter_identifier_rejected_before_store_access() {
        let base = spawn_gateway().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/projects/1/vote"))
            .json(&json!({ "voter_identifier": "   " }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["code"], "MISSING_VOTER_IDENTIFIER");
    }

    #[tokio::test]
    async fn project_crud_over_http() {
        let base = spawn_gateway().await;
        let client = reqwest::Client::new();

        for name in ["Aurora", "Beacon", "Cascade"] {
            client
                .post(format!("{base}/api/projects"))
                .json(&json!({ "team_name": name }))
                .send()
                .await
                .unwrap();
        }

        let listed: Value = client
            .get(format!("{base}/api/projects?sort=teamName&order=asc&limit=2"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let names: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["teamName"].as_str())
            .collect();
        assert_eq!(names, ["Aurora", "Beacon"]);

        let searched: Value = client
            .get(format!("{base}/api/projects?search=bea"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(searched.as_array().unwrap().len(), 1);

        // Update then delete.
        let response = client
            .put(format!("{base}/api/projects/1"))
            .json(&json!({ "description": "updated" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let updated: Value = response.json().await.unwrap();
        assert_eq!(updated["description"], "updated");

        let response = client
            .delete(format!("{base}/api/projects/1"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let response = client
            .get(format!("{base}/api/projects/1"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn activity_append_and_pagination() {
        let base = spawn_gateway().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/admin/activity"))
            .json(&json!({ "action": "Admin login", "details": "console session" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let response = client
            .post(format!("{base}/api/admin/activity"))
            .json(&json!({ "action": "   " }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["code"], "EMPTY_ACTION");

        let listed: Value = client
            .get(format!("{base}/api/admin/activity?limit=10"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["action"], "Admin login");
    }
}
