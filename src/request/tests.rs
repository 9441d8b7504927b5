//! Tests for request parsing.

use super::*;

#[test]
fn test_parse_minimal_request() {
    let request = CrewRequest::from_slice(br#"{"agents": [{}], "tasks": [{}]}"#).unwrap();

    assert_eq!(request.agents.len(), 1);
    assert_eq!(request.tasks.len(), 1);
    assert!(request.verbose);
    assert!(!request.memory);
    assert!(!request.planning);
    assert!(request.inputs.is_empty());
    assert_eq!(request.crew_name(), DEFAULT_CREW_NAME);
}

#[test]
fn test_agent_defaults() {
    let request = CrewRequest::from_slice(br#"{"agents": [{}]}"#).unwrap();
    let agent = &request.agents[0];

    assert_eq!(agent.role, "Assistant");
    assert_eq!(agent.goal, "Complete the assigned task");
    assert_eq!(agent.backstory, "An experienced professional");
    assert!(agent.verbose);
    assert!(!agent.allow_delegation);
    assert_eq!(agent.max_iter, 15);
    assert_eq!(agent.max_rpm, None);
    assert_eq!(agent.max_execution_time, None);
    assert_eq!(agent, &AgentSpec::default());
}

#[test]
fn test_agent_camel_case_fields() {
    let json = br#"{
        "agents": [{
            "role": "Designer",
            "goal": "Produce key visuals",
            "backstory": "Ten years of motion graphics",
            "tools": ["image_generator"],
            "allowDelegation": true,
            "maxIter": 4,
            "maxRpm": 10,
            "maxExecutionTime": 120,
            "llmConfig": {"model": "gpt-4.1", "temperature": 0.2, "maxTokens": 800, "top_p": 0.9}
        }]
    }"#;
    let request = CrewRequest::from_slice(json).unwrap();
    let agent = &request.agents[0];

    assert_eq!(agent.role, "Designer");
    assert_eq!(agent.tools, vec!["image_generator"]);
    assert!(agent.allow_delegation);
    assert_eq!(agent.max_iter, 4);
    assert_eq!(agent.max_rpm, Some(10));
    assert_eq!(agent.max_execution_time, Some(120));

    let llm = agent.llm_config.as_ref().unwrap();
    assert_eq!(llm.model.as_deref(), Some("gpt-4.1"));
    assert_eq!(llm.max_tokens, Some(800));
    assert_eq!(llm.extra["top_p"], 0.9);
}

#[test]
fn test_task_fields_and_defaults() {
    let json = br#"{
        "tasks": [
            {"description": "Outline"},
            {"description": "Script", "expectedOutput": "Full script", "context": [0, -1, 9],
             "outputFile": "out/script.md", "humanInput": true, "asyncExecution": true}
        ]
    }"#;
    let request = CrewRequest::from_slice(json).unwrap();

    assert_eq!(request.tasks[0].expected_output, "A detailed response");
    assert!(request.tasks[0].context.is_empty());

    let task = &request.tasks[1];
    assert_eq!(task.expected_output, "Full script");
    assert_eq!(task.context, vec![0, -1, 9]);
    assert_eq!(task.output_file.as_deref(), Some("out/script.md"));
    assert!(task.human_input);
    assert!(task.async_execution);
}

#[test]
fn test_nulls_are_accepted() {
    let json = br#"{
        "name": null,
        "agents": [{"tools": null, "maxRpm": null, "llmConfig": null}],
        "tasks": [{"context": null, "outputFile": null}],
        "callbacks": null,
        "inputs": null,
        "managerLlmConfig": null
    }"#;
    let request = CrewRequest::from_slice(json).unwrap();

    assert!(request.agents[0].tools.is_empty());
    assert!(request.tasks[0].context.is_empty());
    assert!(request.callbacks.on_task_start);
    assert!(request.manager_llm_config.is_none());
}

#[test]
fn test_nulls_fall_back_to_field_defaults() {
    let json = br#"{
        "verbose": null,
        "memory": null,
        "planning": null,
        "agents": [{
            "role": null,
            "goal": null,
            "backstory": null,
            "verbose": null,
            "allowDelegation": null,
            "memory": null,
            "maxIter": null
        }],
        "tasks": [{
            "description": null,
            "expectedOutput": null,
            "humanInput": null,
            "asyncExecution": null
        }]
    }"#;
    let request = CrewRequest::from_slice(json).unwrap();

    assert!(request.verbose);
    assert!(!request.memory);
    assert!(!request.planning);
    assert_eq!(request.agents[0], AgentSpec::default());
    assert_eq!(request.tasks[0], TaskSpec::default());
    assert_eq!(request.tasks[0].expected_output, "A detailed response");
}

#[test]
fn test_null_expected_output_from_stored_task() {
    let json = br#"{
        "agents": [{"role": "Writer"}],
        "tasks": [{"description": "T0", "expectedOutput": null}]
    }"#;
    let request = CrewRequest::from_slice(json).unwrap();

    assert_eq!(request.agents[0].role, "Writer");
    assert_eq!(request.tasks[0].description, "T0");
    assert_eq!(request.tasks[0].expected_output, "A detailed response");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let json = br#"{"userId": 7, "agents": [{"id": 3, "name": "x"}], "tasks": []}"#;
    let request = CrewRequest::from_slice(json).unwrap();
    assert_eq!(request.agents.len(), 1);
}

#[test]
fn test_global_settings() {
    let json = br#"{
        "name": "  Launch  ",
        "process": "hierarchical",
        "verbose": false,
        "memory": true,
        "planning": true,
        "managerLlmConfig": {"model": "gpt-4.1"},
        "managerAgent": {"role": "Producer"},
        "callbacks": {"onAgentAction": false},
        "inputs": {"brand": "Acme"}
    }"#;
    let request = CrewRequest::from_slice(json).unwrap();

    assert_eq!(request.crew_name(), "Launch");
    assert_eq!(request.process.as_deref(), Some("hierarchical"));
    assert!(!request.verbose);
    assert!(request.memory);
    assert!(request.planning);
    assert_eq!(request.manager_agent.unwrap().role, "Producer");
    assert!(!request.callbacks.on_agent_action);
    assert!(request.callbacks.on_task_complete);
    assert_eq!(request.inputs["brand"], "Acme");
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(CrewRequest::from_slice(b"{not json").is_err());
    assert!(CrewRequest::from_slice(br#"{"agents": 3}"#).is_err());
    assert!(CrewRequest::from_slice(b"").is_err());
}

#[test]
fn test_process_resolution() {
    assert_eq!(ProcessMode::resolve(None).mode, ProcessMode::Sequential);
    assert!(ProcessMode::resolve(None).warning.is_none());

    let sequential = ProcessMode::resolve(Some("sequential"));
    assert_eq!(sequential.mode, ProcessMode::Sequential);
    assert!(sequential.warning.is_none());

    let hierarchical = ProcessMode::resolve(Some("Hierarchical"));
    assert_eq!(hierarchical.mode, ProcessMode::Hierarchical);
    assert!(hierarchical.warning.is_none());
}

#[test]
fn test_consensual_is_downgraded_with_warning() {
    let resolved = ProcessMode::resolve(Some("consensual"));
    assert_eq!(resolved.mode, ProcessMode::Sequential);
    assert!(resolved.warning.unwrap().contains("Consensual"));
}

#[test]
fn test_unknown_process_is_downgraded_with_warning() {
    let resolved = ProcessMode::resolve(Some("round_robin"));
    assert_eq!(resolved.mode, ProcessMode::Sequential);
    assert!(resolved.warning.unwrap().contains("round_robin"));
}

#[test]
fn test_agent_serializes_snake_case() {
    let agent = AgentSpec {
        max_rpm: Some(5),
        ..AgentSpec::default()
    };
    let value = serde_json::to_value(&agent).unwrap();

    assert_eq!(value["max_iter"], 15);
    assert_eq!(value["max_rpm"], 5);
    assert_eq!(value["allow_delegation"], false);
    assert!(value.get("max_execution_time").is_none());
}
