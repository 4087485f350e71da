pub const BUILTIN_CSS: &str = include_str!("builtin.css");

/// Browser runtime for the interactive bits. Parameters arrive as `data-*`
/// attributes on `<body>` and on each `[data-carousel]`, so the values rendered
/// from `SiteConfig` and the Rust models stay the single source.
pub const RUNTIME_JS: &str = r#"(function () {
  var root = document.documentElement;
  var body = document.body;
  var storageKey = body.getAttribute("data-theme-key") || "theme";
  var scrollThreshold = parseFloat(body.getAttribute("data-scroll-threshold") || "8");
  var copyAckMs = parseInt(body.getAttribute("data-copy-ack-ms") || "1500", 10);
  root.classList.add("js");

  // Theme: stored -> prefers-color-scheme -> dark.
  function readStored() {
    try {
      var v = window.localStorage.getItem(storageKey);
      return v === "light" || v === "dark" ? { ok: true, value: v } : { ok: true, value: null };
    } catch (_) {
      return { ok: false, value: null };
    }
  }

  function ambient() {
    try {
      if (!window.matchMedia) return null;
      if (window.matchMedia("(prefers-color-scheme: dark)").matches) return "dark";
      if (window.matchMedia("(prefers-color-scheme: light)").matches) return "light";
    } catch (_) {}
    return null;
  }

  var theme = "dark";
  var stored = readStored();
  if (stored.ok) {
    theme = stored.value || ambient() || "dark";
  }

  function applyTheme() {
    root.classList.toggle("dark", theme === "dark");
    var buttons = document.querySelectorAll("[data-theme-toggle]");
    for (var i = 0; i < buttons.length; i++) {
      buttons[i].setAttribute("title", theme === "dark" ? "Tema: Escuro" : "Tema: Claro");
      buttons[i].setAttribute("data-theme-current", theme);
    }
  }

  function toggleTheme() {
    theme = theme === "dark" ? "light" : "dark";
    applyTheme();
    try {
      window.localStorage.setItem(storageKey, theme);
    } catch (e) {
      console.warn("failed to persist theme", e);
    }
  }

  applyTheme();
  var toggles = document.querySelectorAll("[data-theme-toggle]");
  for (var t = 0; t < toggles.length; t++) {
    toggles[t].addEventListener("click", toggleTheme);
  }

  // Mobile menu.
  var menuButton = document.querySelector("[data-menu-toggle]");
  var menu = document.getElementById("mobile-menu");
  if (menuButton && menu) {
    menuButton.addEventListener("click", function () {
      var open = menu.hasAttribute("hidden");
      if (open) menu.removeAttribute("hidden"); else menu.setAttribute("hidden", "");
      menuButton.setAttribute("aria-expanded", open ? "true" : "false");
    });
  }

  // Header shadow: passive listener, one update per frame.
  var header = document.querySelector(".site-header");
  var scrollQueued = false;
  function updateShadow() {
    scrollQueued = false;
    if (header) header.classList.toggle("site-header--scrolled", window.scrollY > scrollThreshold);
  }
  updateShadow();
  window.addEventListener("scroll", function () {
    if (scrollQueued) return;
    scrollQueued = true;
    window.requestAnimationFrame(updateShadow);
  }, { passive: true });

  // Carousels: one live interval per instance, restarted on manual navigation.
  var carousels = document.querySelectorAll("[data-carousel]");
  var timers = [];
  for (var c = 0; c < carousels.length; c++) {
    (function (el) {
      var slides = el.querySelectorAll("[data-slide]");
      var dots = el.querySelectorAll("[data-goto]");
      var len = slides.length;
      var interval = parseInt(el.getAttribute("data-interval-ms") || "8000", 10);
      var index = 0;
      var timer = null;
      if (len === 0) return;

      function render() {
        for (var i = 0; i < len; i++) {
          slides[i].style.transform = "translateX(" + 100 * (i - index) + "%)";
          slides[i].setAttribute("aria-hidden", i === index ? "false" : "true");
        }
        for (var d = 0; d < dots.length; d++) {
          dots[d].classList.toggle("carousel-dot--active", d === index);
        }
      }

      function stop() {
        if (timer !== null) {
          clearInterval(timer);
          timer = null;
        }
      }

      function start() {
        stop();
        timer = setInterval(function () {
          index = (index + 1) % len;
          render();
        }, interval);
      }

      function goTo(i) {
        index = ((i % len) + len) % len;
        render();
        start();
      }

      var prev = el.querySelector("[data-prev]");
      var next = el.querySelector("[data-next]");
      if (prev) prev.addEventListener("click", function () { goTo(index - 1); });
      if (next) next.addEventListener("click", function () { goTo(index + 1); });
      for (var d = 0; d < dots.length; d++) {
        (function (n) {
          dots[n].addEventListener("click", function () { goTo(n); });
        })(d);
      }

      render();
      start();
      timers.push(stop);
    })(carousels[c]);
  }
  window.addEventListener("pagehide", function () {
    for (var i = 0; i < timers.length; i++) timers[i]();
  });

  // Copy buttons: one pending revert per button, restarted on re-copy.
  var copyButtons = document.querySelectorAll("[data-copy]");
  for (var b = 0; b < copyButtons.length; b++) {
    (function (btn) {
      var revert = null;
      var label = btn.querySelector("[data-copy-label]");
      btn.addEventListener("click", function () {
        var value = btn.getAttribute("data-copy");
        if (!navigator.clipboard || !navigator.clipboard.writeText) {
          console.error("clipboard unavailable");
          return;
        }
        navigator.clipboard.writeText(value).then(function () {
          if (revert !== null) clearTimeout(revert);
          btn.classList.add("copy-btn--copied");
          if (label) label.textContent = "Copiado";
          revert = setTimeout(function () {
            revert = null;
            btn.classList.remove("copy-btn--copied");
            if (label) label.textContent = "Copiar";
          }, copyAckMs);
        }, function (e) {
          console.error(e);
        });
      });
    })(copyButtons[b]);
  }

  // Reveal-on-scroll.
  var reveals = document.querySelectorAll(".reveal");
  if ("IntersectionObserver" in window) {
    var obs = new IntersectionObserver(function (entries) {
      entries.forEach(function (e) {
        if (e.isIntersecting) {
          e.target.classList.add("reveal--visible");
          obs.unobserve(e.target);
        }
      });
    }, { threshold: 0.15 });
    for (var r = 0; r < reveals.length; r++) obs.observe(reveals[r]);
  } else {
    for (var q = 0; q < reveals.length; q++) reveals[q].classList.add("reveal--visible");
  }
})();"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_reads_its_parameters_from_data_attributes() {
        for attr in [
            "data-theme-key",
            "data-scroll-threshold",
            "data-copy-ack-ms",
            "data-interval-ms",
            "data-theme-toggle",
            "data-copy",
        ] {
            assert!(RUNTIME_JS.contains(attr), "{attr}");
        }
    }

    #[test]
    fn stylesheet_has_both_themes() {
        assert!(BUILTIN_CSS.contains(":root"));
        assert!(BUILTIN_CSS.contains(".dark"));
        assert!(BUILTIN_CSS.contains(".site-header--scrolled"));
    }
}
