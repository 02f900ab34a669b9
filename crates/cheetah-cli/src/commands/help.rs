use crate::output;

/// Help for the main prompt
pub fn main_help() {
    output::plain("\nCheetah help");

    output::plain("\nSheet management");
    output::plain("    - sheets                     list available sheets");
    output::plain("    - <sheet>                    select a sheet");
    output::plain("    - create <sheet>             create an empty sheet");

    output::plain("\nEntries");
    output::plain("    - ls                         list all commands from sheet");
    output::plain("    - ls <id>                    show one command");
    output::plain("    - tool <tool>                list commands from tool");
    output::plain("    - tag <tag1> <tag2> ...      list commands from tags");
    output::plain("    - add                        add a command to sheet");
    output::plain("    - edit <id> [fields...]      edit tool, args, desc or tags");
    output::plain("    - rm <id1> <id2>-<id3> ...   delete commands by id");
    output::plain("    - cp <id>                    copy command to clipboard");

    output::plain("\nTags");
    output::plain("    - tags                       list available tags");
    output::plain("    - prune                      delete tags no command uses");

    output::plain("\nTools");
    output::plain("    - tools                      list available tools");

    output::plain("\nOther");
    output::plain("    - clear                      clear the screen");
    output::plain("    - exit                       quit");
}

/// Help for the tag sub-prompt of `edit`
pub fn edit_tags_help() {
    output::plain("\nEdit tags help");

    output::plain("    - rm <tag> <tag> ...         remove tags from command");
    output::plain("    - add <tag> <tag> ...        add tags to command");
    output::plain("    - ls                         show current tags of command");
    output::plain("\nEnter empty line to confirm changes.");
}
