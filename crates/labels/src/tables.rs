//! Built-in rule tables for Node.js core.
//!
//! Entry order matters: earlier entries override later ones for any path
//! they match.

/// Label that replaces a set of fine-grained subsystem labels on collapse.
pub const LIB_SRC_LABEL: &str = "lib / src";

/// Rules for source, build, tooling, dependency and `lib/` paths.
pub const GENERAL_RULES: &[(&str, &[&str])] = &[
    // src subsystems
    (r"^src/async_wrap", &["c++", "async_wrap"]),
    (r"^src/(?:base64|node_buffer|string_)", &["c++", "buffer"]),
    (r"^src/cares", &["c++", "cares"]),
    (r"^src/(?:process_wrap|spawn_)", &["c++", "child_process"]),
    (r"^src/node_crypto", &["c++", "crypto"]),
    (r"^src/(?:debug-|node_debug)", &["c++", "debugger"]),
    (r"^src/udp_", &["c++", "dgram"]),
    (r"^src/(?:fs_|node_file|node_stat_watcher)", &["c++", "fs"]),
    (r"^src/node_http_parser", &["c++", "http_parser"]),
    (r"^src/node_i18n", &["c++", "intl"]),
    (r"^src/uv\.", &["c++", "libuv"]),
    (r"^src/(?:connect(?:ion)?|pipe|tcp)_", &["c++", "net"]),
    (r"^src/node_os", &["c++", "os"]),
    (r"^src/(?:node_main|signal_)", &["c++", "process"]),
    (r"^src/timer_", &["c++", "timers"]),
    (r"^src/(?:CNNICHashWhitelist|node_root_certs|tls_)", &["c++", "tls"]),
    (r"^src/tty_", &["c++", "tty"]),
    (r"^src/node_url", &["c++", "url-whatwg"]),
    (r"^src/node_util", &["c++", "util"]),
    (r"^src/(?:node_v8|v8abbr)", &["c++", "V8 Engine"]),
    (r"^src/node_contextify", &["c++", "vm"]),
    (r"^src/.*win32.*", &["c++", "windows"]),
    (r"^src/node_zlib", &["c++", "zlib"]),
    (r"^src/tracing", &["c++", "tracing"]),
    (r"^src/node_api", &["c++", "n-api"]),
    (r"^src/node_http2", &["c++", "http2", "dont-land-on-v6.x"]),
    (r"^src/node_report", &["c++", "report"]),
    (r"^src/node_wasi", &["c++", "wasi"]),
    (r"^src/node_worker", &["c++", "worker"]),
    // python helpers under src/ are not c++
    (r"^src/.+\.py$", &[LIB_SRC_LABEL]),
    (r"^src/inspector_", &["c++", "inspector"]),
    // bumping the Node.js version alone is not a c++ change
    (r"^src/node_version\.h", &[""]),
    (r"^src/", &["c++"]),
    // BUILDING.md is both build and doc
    (r"^BUILDING\.md$", &["build", "doc"]),
    // policy and meta-info files
    (
        r"^([A-Z]+$|CODE_OF_CONDUCT|ROADMAP|WORKING_GROUPS|GOVERNANCE|CHANGELOG|\.mail|\.git.+)",
        &["meta"],
    ),
    // any other top-level .md file is documentation
    (r"^\w+\.md$", &["doc"]),
    // Makefile variants and build files
    (
        r"^(tools/)?(Makefile|BSDmakefile|create_android_makefiles|\.travis\.yml)$",
        &["build"],
    ),
    (
        r"^tools/(install\.py|genv8constants\.py|getnodeversion\.py|js2c\.py|utils\.py|configure\.d/.*)$",
        &["build"],
    ),
    (r"^vcbuild\.bat$", &["build", "windows"]),
    (r"^(android-)?configure|node\.gyp|common\.gypi$", &["build"]),
    // more specific tools
    (r"^tools/gyp", &["tools", "build"]),
    (r"^tools/doc/", &["tools", "doc"]),
    (r"^tools/icu/", &["tools", "intl"]),
    (r"^tools/(?:osx-pkg\.pmdoc|pkgsrc)/", &["tools", "macos", "install"]),
    (r"^tools/(?:(?:mac)?osx-)", &["tools", "macos"]),
    (r"^tools/test-npm", &["tools", "test", "npm"]),
    (r"^tools/test", &["tools", "test"]),
    (
        r"^tools/(?:certdata|mkssldef|mk-ca-bundle)",
        &["tools", "openssl", "tls"],
    ),
    (r"^tools/msvs/", &["tools", "windows", "install"]),
    (r"^tools/[^/]+\.bat$", &["tools", "windows"]),
    (r"^tools/make-v8", &["tools", "V8 Engine"]),
    (r"^tools/", &["tools"]),
    (r"^\.eslint|\.remark|\.editorconfig", &["tools"]),
    // dependencies; deps/uv needs its own entry or it would be labelled "uv"
    (r"^deps/uv/", &["libuv"]),
    (
        r"^deps/v8/tools/gen-postmortem-metadata\.py",
        &["V8 Engine", "post-mortem"],
    ),
    (r"^deps/v8/", &["V8 Engine"]),
    (r"^deps/uvwasi/", &["wasi"]),
    (
        r"^deps/nghttp2/nghttp2\.gyp",
        &["build", "http2", "dont-land-on-v6.x"],
    ),
    (r"^deps/nghttp2/", &["http2", "dont-land-on-v6.x"]),
    (r"^deps/([^/]+)", &["$1"]),
    // lib oddities first
    (r"^lib/(punycode|\w+/freelist|sys\.js)", &[""]),
    (r"^lib/constants\.js$", &[LIB_SRC_LABEL]),
    (r"^lib/_(debug_agent|debugger)\.js$", &["debugger"]),
    (r"^lib(/\w+)?/(_)?link(ed)?list", &["timers"]),
    (r"^lib/\w+/bootstrap_node", &[LIB_SRC_LABEL]),
    (r"^lib/\w+/v8_prof_", &["tools"]),
    (r"^lib/\w+/socket_list", &["net"]),
    (r"^lib/\w+/streams$", &["stream"]),
    (r"^lib/.*http2", &["http2", "dont-land-on-v6.x"]),
    (r"^lib/worker_threads.js$", &["worker"]),
    (r"^lib/internal/url\.js$", &["url-whatwg"]),
    (r"^lib/internal/modules/esm", &["ES Modules"]),
    // all other lib/ files map directly, e.g. _(stream)_wrap
    (r"^lib/_(\w+)_\w+\.js?$", &["$1"]),
    (r"^lib(/internal)?/(\w+)\.js?$", &["$2"]),
    (r"^lib/internal/(\w+)(?:/|$)", &["$1"]),
];

/// Rules for changesets that live entirely under `test/`, `doc/` or `benchmark/`.
pub const EXCLUSIVE_RULES: &[(&str, &[&str])] = &[
    // more specific tests
    (r"^test/addons/", &["test", "addons"]),
    (r"^test/debugger/", &["test", "debugger"]),
    (r"^test/doctool/", &["test", "doc", "tools"]),
    (r"^test/timers/", &["test", "timers"]),
    (r"^test/pseudo-tty/", &["test", "tty"]),
    (r"^test/inspector/", &["test", "inspector"]),
    (r"^test/cctest/test_inspector", &["test", "inspector"]),
    (r"^test/cctest/test_url", &["test", "url-whatwg"]),
    (r"^test/addons-napi/", &["test", "n-api"]),
    (r"^test/async-hooks/", &["test", "async_hooks"]),
    (r"^test/report/", &["test", "report"]),
    (r"^test/fixtures/es-module", &["test", "ES Modules"]),
    (r"^test/es-module/", &["test", "ES Modules"]),
    (r"^test/", &["test"]),
    // modules.md is the `module` subsystem, not `modules`
    (r"^doc/api/modules.md$", &["doc", "module"]),
    (r"^doc/api/esm.md$", &["doc", "ES Modules"]),
    // n-api is not a JS core module but still a subsystem of sorts
    (r"^doc/api/n-api.md$", &["doc", "n-api"]),
    (r"^doc/api/worker_threads.md$", &["doc", "worker"]),
    // subsystem-specific API docs
    (r"^doc/api/(\w+)\.md$", &["doc", "$1"]),
    (r"^doc/api/deprecations.md$", &["doc", "deprecations"]),
    (r"^doc/", &["doc"]),
    // more specific benchmarks
    (r"^benchmark/buffers/", &["benchmark", "buffer"]),
    (r"^benchmark/(?:arrays|es)/", &["benchmark", "V8 Engine"]),
    (r"^benchmark/_http", &["benchmark", "http"]),
    (r"^benchmark/(?:misc|fixtures)/", &["benchmark"]),
    (r"^benchmark/streams/", &["benchmark", "stream"]),
    (r"^benchmark/([^/]+)/", &["benchmark", "$1"]),
    (r"^benchmark/", &["benchmark"]),
];

/// Fine-grained JS subsystem labels, as opposed to structural ones like
/// `build`, `test`, `doc`, `meta` or `c++`.
pub const JS_SUBSYSTEMS: &[&str] = &[
    "debugger",
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "esm",
    "fs",
    "http",
    "https",
    "http2",
    "module",
    "net",
    "os",
    "path",
    "process",
    "querystring",
    "readline",
    "repl",
    "report",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker",
    "zlib",
];
