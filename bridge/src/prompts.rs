//! Prompt catalog — guided starting points for common container tasks
//!
//! Prompts are static recipes built around the container.list tool. Each
//! renders to a short conversation; templated ones substitute a single
//! argument with a sensible default.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct PromptArg {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptMessage {
    pub role: &'static str,
    pub text: String,
}

type RenderFn = fn(&HashMap<String, String>) -> Vec<PromptMessage>;

pub struct Prompt {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub arguments: &'static [PromptArg],
    render: RenderFn,
}

pub struct PromptCatalog {
    prompts: Vec<Prompt>,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptCatalog {
    pub fn new() -> Self {
        Self {
            prompts: vec![
                Prompt {
                    name: "list_containers_guide",
                    title: "List Containers",
                    description: "Guide for using the container.list tool effectively.",
                    arguments: &[],
                    render: render_list_guide,
                },
                Prompt {
                    name: "filter_by_status",
                    title: "Filter Containers by Status",
                    description: "Ask for all containers in a given state.",
                    arguments: &[PromptArg {
                        name: "status",
                        description: "Container state to filter on (running, exited, paused, ...)",
                        required: false,
                    }],
                    render: render_filter_by_status,
                },
                Prompt {
                    name: "find_by_name",
                    title: "Find Container by Name",
                    description: "Ask for containers whose name matches a pattern.",
                    arguments: &[PromptArg {
                        name: "name_pattern",
                        description: "Substring to match against container names",
                        required: false,
                    }],
                    render: render_find_by_name,
                },
                Prompt {
                    name: "container_overview",
                    title: "Container Overview",
                    description: "Ask for a snapshot of all containers and their states.",
                    arguments: &[],
                    render: render_overview,
                },
                Prompt {
                    name: "check_container_exists",
                    title: "Check Container Existence",
                    description: "Ask whether a specific container exists and in what state.",
                    arguments: &[PromptArg {
                        name: "container_name",
                        description: "Name of the container to look for",
                        required: false,
                    }],
                    render: render_check_exists,
                },
                Prompt {
                    name: "find_by_image",
                    title: "Find Containers by Image",
                    description: "Ask for all containers created from a given image.",
                    arguments: &[PromptArg {
                        name: "image_name",
                        description: "Image reference the containers were created from",
                        required: false,
                    }],
                    render: render_find_by_image,
                },
                Prompt {
                    name: "recent_activity",
                    title: "Recent Container Activity",
                    description: "Ask for a summary of recent container starts and stops.",
                    arguments: &[],
                    render: render_recent_activity,
                },
            ],
        }
    }

    pub fn list(&self) -> impl Iterator<Item = &Prompt> {
        self.prompts.iter()
    }

    /// Render a prompt with the given arguments. `None` when the name is
    /// not in the catalog.
    pub fn get(
        &self,
        name: &str,
        args: &HashMap<String, String>,
    ) -> Option<(&'static str, Vec<PromptMessage>)> {
        self.prompts
            .iter()
            .find(|p| p.name == name)
            .map(|p| (p.description, (p.render)(args)))
    }
}

fn arg<'a>(args: &'a HashMap<String, String>, name: &str, default: &'a str) -> &'a str {
    args.get(name).map(String::as_str).unwrap_or(default)
}

fn user(text: impl Into<String>) -> PromptMessage {
    PromptMessage {
        role: "user",
        text: text.into(),
    }
}

fn assistant(text: impl Into<String>) -> PromptMessage {
    PromptMessage {
        role: "assistant",
        text: text.into(),
    }
}

fn render_list_guide(_args: &HashMap<String, String>) -> Vec<PromptMessage> {
    vec![
        user("I need help understanding how to use the container.list tool."),
        assistant(
            "The container.list tool gives a clean overview of the containers on \
this host.

For each container you get its id, names, image, current state and status \
line, creation time, port mappings, and labels.

Key parameters:
- `all` (bool): include stopped containers, not just running ones
- `limit` (int): cap the number of rows
- `status`: keep only containers in this state (running, exited, paused, ...)
- `name`: keep only containers whose name contains this value
- `ancestor`: keep only containers created from this image
- `label`: keep only containers carrying this label

Examples:
1. Running containers: call container.list with {}
2. Everything: {\"all\": true}
3. Exited containers: {\"all\": true, \"status\": \"exited\"}
4. By name: {\"all\": true, \"name\": \"web\"}

For full detail on one container (mounts, networks, restart policy), follow \
up with container.inspect.

What are you looking for?",
        ),
    ]
}

fn render_filter_by_status(args: &HashMap<String, String>) -> Vec<PromptMessage> {
    let status = arg(args, "status", "exited");
    vec![user(format!(
        "Please list all containers with status '{status}'.

Use the container.list tool with {{\"all\": true, \"status\": \"{status}\"}} \
to show containers currently in that state, with their names, ids, and \
images for further investigation."
    ))]
}

fn render_find_by_name(args: &HashMap<String, String>) -> Vec<PromptMessage> {
    let pattern = arg(args, "name_pattern", "web");
    vec![user(format!(
        "Please find containers with names containing '{pattern}'.

Use the container.list tool with {{\"all\": true, \"name\": \"{pattern}\"}} \
to locate matching containers. This is useful for getting container ids for \
further operations and for checking whether specific containers exist."
    ))]
}

fn render_overview(_args: &HashMap<String, String>) -> Vec<PromptMessage> {
    vec![
        user("Can you give me an overview of my containers?"),
        assistant(
            "I'll use the container.list tool with {\"all\": true} and summarize:
- how many containers are running versus stopped
- container names and their current states
- which images they are based on
- basic port mappings

For logs or detailed configuration of a specific container, I can follow up \
with container.logs or container.inspect.",
        ),
    ]
}

fn render_check_exists(args: &HashMap<String, String>) -> Vec<PromptMessage> {
    let name = arg(args, "container_name", "my-app");
    vec![user(format!(
        "Please check whether a container named '{name}' exists and show its \
current state.

Use the container.list tool with {{\"all\": true, \"name\": \"{name}\"}}. If \
the result is empty, the container does not exist; otherwise report its id \
and state."
    ))]
}

fn render_find_by_image(args: &HashMap<String, String>) -> Vec<PromptMessage> {
    let image = arg(args, "image_name", "nginx");
    vec![user(format!(
        "Please find all containers created from the '{image}' image.

Use the container.list tool with {{\"all\": true, \"ancestor\": \"{image}\"}} \
to locate them. This helps with finding every instance of a particular \
application and collecting their ids and states."
    ))]
}

fn render_recent_activity(_args: &HashMap<String, String>) -> Vec<PromptMessage> {
    vec![user(
        "Please show recent container activity.

Use the container.list tool with {\"all\": true} and report currently \
running containers alongside recently stopped ones, using each container's \
status line to identify recent starts and exits."
            .to_string(),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_all_prompts() {
        let catalog = PromptCatalog::new();
        let names: Vec<&str> = catalog.list().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "list_containers_guide",
                "filter_by_status",
                "find_by_name",
                "container_overview",
                "check_container_exists",
                "find_by_image",
                "recent_activity",
            ]
        );
    }

    #[test]
    fn test_get_unknown_prompt() {
        let catalog = PromptCatalog::new();
        assert!(catalog.get("no_such_prompt", &HashMap::new()).is_none());
    }

    #[test]
    fn test_template_argument_substitution() {
        let catalog = PromptCatalog::new();
        let mut args = HashMap::new();
        args.insert("status".to_string(), "paused".to_string());
        let (_, messages) = catalog.get("filter_by_status", &args).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.contains("'paused'"));
        assert!(!messages[0].text.contains("exited"));
    }

    #[test]
    fn test_template_default_applies() {
        let catalog = PromptCatalog::new();
        let (_, messages) = catalog.get("find_by_name", &HashMap::new()).unwrap();
        assert!(messages[0].text.contains("'web'"));
    }

    #[test]
    fn test_guide_is_a_conversation() {
        let catalog = PromptCatalog::new();
        let (_, messages) = catalog.get("list_containers_guide", &HashMap::new()).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
        assert!(messages[1].text.contains("container.list"));
    }
}
