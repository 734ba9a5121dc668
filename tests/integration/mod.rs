/// Integration tests: storage on disk, tools across days and the MCP layer
mod mcp_tests;
mod workflow_tests;
